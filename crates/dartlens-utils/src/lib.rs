//! Utility functions and helpers
//!
//! Amounts arrive from the filings source as grouped-decimal strings
//! (`"1,234,567"`), sometimes as `-` or nothing at all. Everything numeric in
//! the workspace goes through [`decode_amount`] so that a bad field degrades to
//! zero instead of failing the computation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const JO: i64 = 1_000_000_000_000;
const EOK: i64 = 100_000_000;
const MAN: i64 = 10_000;

/// Placeholder the filings source uses for "no figure reported"
pub const PLACEHOLDER: &str = "-";

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Decode a grouped-decimal amount string into whole KRW.
///
/// Grouping commas and surrounding whitespace are ignored. Empty input, the
/// `-` placeholder and anything that does not parse decode to `0`. Fractional
/// values are truncated toward zero.
pub fn decode_amount(raw: &str) -> i64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() || cleaned == PLACEHOLDER {
        return 0;
    }

    if let Ok(value) = cleaned.parse::<i64>() {
        return value;
    }

    cleaned
        .parse::<Decimal>()
        .ok()
        .and_then(|d| d.trunc().to_i64())
        .unwrap_or(0)
}

/// Decode an optional amount field; a missing field is `0`
pub fn decode_optional(raw: Option<&str>) -> i64 {
    raw.map(decode_amount).unwrap_or(0)
}

/// Check whether a raw amount field carries no figure at all
pub fn is_absent(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(s) => {
            let trimmed = s.trim();
            trimmed.is_empty() || trimmed == PLACEHOLDER
        }
    }
}

/// Korean order-of-magnitude unit used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KoreanUnit {
    /// 10^12
    Jo,
    /// 10^8
    Eok,
    /// 10^4
    Man,
    /// Plain won with thousands separators
    Won,
}

impl KoreanUnit {
    /// Pick the largest unit whose quotient has magnitude of at least one
    pub fn for_amount(amount: i64) -> Self {
        let magnitude = amount.unsigned_abs();
        if magnitude >= JO as u64 {
            KoreanUnit::Jo
        } else if magnitude >= EOK as u64 {
            KoreanUnit::Eok
        } else if magnitude >= MAN as u64 {
            KoreanUnit::Man
        } else {
            KoreanUnit::Won
        }
    }

    fn divisor(&self) -> i64 {
        match self {
            KoreanUnit::Jo => JO,
            KoreanUnit::Eok => EOK,
            KoreanUnit::Man => MAN,
            KoreanUnit::Won => 1,
        }
    }

    fn decimals(&self) -> u32 {
        match self {
            KoreanUnit::Jo => 2,
            _ => 0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            KoreanUnit::Jo => "조원",
            KoreanUnit::Eok => "억원",
            KoreanUnit::Man => "만원",
            KoreanUnit::Won => "원",
        }
    }
}

/// Render an amount in the largest fitting Korean unit.
///
/// `1_000_000_000_000` renders as `1.00조원`, `150_000_000` as `2억원`
/// (half away from zero), and anything under ten thousand as grouped won.
pub fn format_krw(amount: i64) -> String {
    let unit = KoreanUnit::for_amount(amount);
    if unit == KoreanUnit::Won {
        return format!("{}{}", format_number(amount), unit.suffix());
    }

    let decimals = unit.decimals();
    let scaled = (Decimal::from(amount) / Decimal::from(unit.divisor()))
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}{}", decimals as usize, scaled, unit.suffix())
}

/// Render a raw amount field: absent figures become `-`, present ones go
/// through [`format_krw`] (so a reported zero is `0원`).
pub fn format_raw_amount(raw: Option<&str>) -> String {
    if is_absent(raw) {
        return PLACEHOLDER.to_string();
    }
    format_krw(decode_optional(raw))
}

/// Scale an amount to trillions of KRW for chart axes
pub fn to_trillions(amount: i64) -> f64 {
    amount as f64 / JO as f64
}

// ==================== Tests ====================
