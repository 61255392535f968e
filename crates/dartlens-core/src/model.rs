//! Statement line items and reporting periods

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use dartlens_utils::decode_optional;

use crate::error::CoreError;

/// Consolidation scope of a statement row (`fs_div`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsolidationScope {
    /// Consolidated financial statements (`CFS`)
    Consolidated,
    /// Separate / standalone statements (`OFS` and anything else)
    Separate,
}

impl Default for ConsolidationScope {
    fn default() -> Self {
        ConsolidationScope::Separate
    }
}

impl From<String> for ConsolidationScope {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("CFS") {
            ConsolidationScope::Consolidated
        } else {
            ConsolidationScope::Separate
        }
    }
}

impl From<ConsolidationScope> for String {
    fn from(scope: ConsolidationScope) -> Self {
        match scope {
            ConsolidationScope::Consolidated => "CFS".to_string(),
            ConsolidationScope::Separate => "OFS".to_string(),
        }
    }
}

/// Statement category of a row (`sj_div`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatementType {
    /// Balance sheet (`BS`)
    BalanceSheet,
    /// Income statement (`IS`)
    IncomeStatement,
    /// Cash flow statement (`CF`)
    CashFlow,
    /// Any other code, kept verbatim
    Other(String),
}

impl Default for StatementType {
    fn default() -> Self {
        StatementType::Other(String::new())
    }
}

impl From<String> for StatementType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "BS" => StatementType::BalanceSheet,
            "IS" => StatementType::IncomeStatement,
            "CF" => StatementType::CashFlow,
            _ => StatementType::Other(s),
        }
    }
}

impl From<StatementType> for String {
    fn from(statement: StatementType) -> Self {
        match statement {
            StatementType::BalanceSheet => "BS".to_string(),
            StatementType::IncomeStatement => "IS".to_string(),
            StatementType::CashFlow => "CF".to_string(),
            StatementType::Other(code) => code,
        }
    }
}

/// One of the three comparative periods carried by every row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// 당기
    Current,
    /// 전기
    Prior,
    /// 전전기
    PriorPrior,
}

impl Default for Period {
    fn default() -> Self {
        Period::Current
    }
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Current, Period::Prior, Period::PriorPrior];

    /// Korean name used when no year can be extracted
    pub fn symbolic_name(&self) -> &'static str {
        match self {
            Period::Current => "당기",
            Period::Prior => "전기",
            Period::PriorPrior => "전전기",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" | "당기" | "thstrm" => Ok(Period::Current),
            "prior" | "전기" | "frmtrm" => Ok(Period::Prior),
            "prior_prior" | "prior-prior" | "전전기" | "bfefrmtrm" => Ok(Period::PriorPrior),
            _ => Err(CoreError::ValidationError {
                message: format!("Invalid period: {}", s),
            }),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Current => write!(f, "current"),
            Period::Prior => write!(f, "prior"),
            Period::PriorPrior => write!(f, "prior_prior"),
        }
    }
}

/// First four-digit run in a date string (`"2023.12.31 현재"` -> `"2023"`)
pub fn extract_year(date: Option<&str>) -> Option<String> {
    static YEAR: OnceCell<Regex> = OnceCell::new();
    let year_regex = YEAR.get_or_init(|| Regex::new(r"\d{4}").unwrap());
    date.and_then(|d| year_regex.find(d)).map(|m| m.as_str().to_string())
}

/// Raw statement row as returned by the filings API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "fs_div", default)]
    pub scope: ConsolidationScope,
    #[serde(rename = "sj_div", default)]
    pub statement: StatementType,
    /// Display name of the statement (e.g. "재무상태표")
    #[serde(rename = "sj_nm", default, skip_serializing_if = "Option::is_none")]
    pub statement_name: Option<String>,
    #[serde(rename = "account_nm")]
    pub account_name: String,
    #[serde(rename = "thstrm_amount", default)]
    pub current_amount: Option<String>,
    #[serde(rename = "frmtrm_amount", default)]
    pub prior_amount: Option<String>,
    #[serde(rename = "bfefrmtrm_amount", default)]
    pub prior_prior_amount: Option<String>,
    #[serde(rename = "thstrm_dt", default)]
    pub current_date: Option<String>,
    #[serde(rename = "frmtrm_dt", default)]
    pub prior_date: Option<String>,
    #[serde(rename = "bfefrmtrm_dt", default)]
    pub prior_prior_date: Option<String>,
}

impl LineItem {
    /// Create a row without amounts or dates
    pub fn new(scope: ConsolidationScope, statement: StatementType, account_name: &str) -> Self {
        Self {
            scope,
            statement,
            account_name: account_name.to_string(),
            ..Default::default()
        }
    }

    /// Set the three raw amounts (current, prior, prior-prior)
    pub fn with_amounts(mut self, current: &str, prior: &str, prior_prior: &str) -> Self {
        self.current_amount = Some(current.to_string());
        self.prior_amount = Some(prior.to_string());
        self.prior_prior_amount = Some(prior_prior.to_string());
        self
    }

    /// Set the three raw date strings
    pub fn with_dates(mut self, current: &str, prior: &str, prior_prior: &str) -> Self {
        self.current_date = Some(current.to_string());
        self.prior_date = Some(prior.to_string());
        self.prior_prior_date = Some(prior_prior.to_string());
        self
    }

    pub fn with_statement_name(mut self, name: &str) -> Self {
        self.statement_name = Some(name.to_string());
        self
    }

    pub fn is_consolidated(&self) -> bool {
        self.scope == ConsolidationScope::Consolidated
    }

    /// Raw amount string for a period
    pub fn raw_amount(&self, period: Period) -> Option<&str> {
        match period {
            Period::Current => self.current_amount.as_deref(),
            Period::Prior => self.prior_amount.as_deref(),
            Period::PriorPrior => self.prior_prior_amount.as_deref(),
        }
    }

    /// Raw date string for a period
    pub fn raw_date(&self, period: Period) -> Option<&str> {
        match period {
            Period::Current => self.current_date.as_deref(),
            Period::Prior => self.prior_date.as_deref(),
            Period::PriorPrior => self.prior_prior_date.as_deref(),
        }
    }

    /// Decoded amount for a period, `0` when absent or malformed
    pub fn amount(&self, period: Period) -> i64 {
        decode_optional(self.raw_amount(period))
    }
}

/// Display labels for the three periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLabels {
    pub current: String,
    pub prior: String,
    pub prior_prior: String,
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self {
            current: Period::Current.symbolic_name().to_string(),
            prior: Period::Prior.symbolic_name().to_string(),
            prior_prior: Period::PriorPrior.symbolic_name().to_string(),
        }
    }
}

impl PeriodLabels {
    /// Labels taken from the date fields of the first row
    pub fn from_items(items: &[LineItem]) -> Self {
        let Some(first) = items.first() else {
            return Self::default();
        };
        let label = |period: Period| {
            extract_year(first.raw_date(period))
                .unwrap_or_else(|| period.symbolic_name().to_string())
        };
        Self {
            current: label(Period::Current),
            prior: label(Period::Prior),
            prior_prior: label(Period::PriorPrior),
        }
    }

    pub fn get(&self, period: Period) -> &str {
        match period {
            Period::Current => &self.current,
            Period::Prior => &self.prior,
            Period::PriorPrior => &self.prior_prior,
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dart_row() {
        let json = r#"{
            "rcept_no": "20240312000736",
            "fs_div": "CFS",
            "fs_nm": "연결재무제표",
            "sj_div": "BS",
            "sj_nm": "재무상태표",
            "account_nm": "자산총계",
            "thstrm_dt": "2023.12.31 현재",
            "thstrm_amount": "455,905,980,000,000",
            "frmtrm_dt": "2022.12.31 현재",
            "frmtrm_amount": "448,424,507,000,000",
            "bfefrmtrm_amount": null
        }"#;
        let item: LineItem = serde_json::from_str(json).unwrap();

        assert!(item.is_consolidated());
        assert_eq!(item.statement, StatementType::BalanceSheet);
        assert_eq!(item.statement_name.as_deref(), Some("재무상태표"));
        assert_eq!(item.amount(Period::Current), 455_905_980_000_000);
        assert_eq!(item.amount(Period::PriorPrior), 0);
        assert_eq!(item.raw_amount(Period::PriorPrior), None);
    }

    #[test]
    fn test_scope_and_statement_codes() {
        assert_eq!(ConsolidationScope::from("OFS".to_string()), ConsolidationScope::Separate);
        assert_eq!(ConsolidationScope::from("cfs".to_string()), ConsolidationScope::Consolidated);
        assert_eq!(StatementType::from("is".to_string()), StatementType::IncomeStatement);
        assert_eq!(
            StatementType::from("CIS".to_string()),
            StatementType::Other("CIS".to_string())
        );
        assert_eq!(String::from(StatementType::CashFlow), "CF");
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("current".parse::<Period>().unwrap(), Period::Current);
        assert_eq!("전기".parse::<Period>().unwrap(), Period::Prior);
        assert_eq!("prior_prior".parse::<Period>().unwrap(), Period::PriorPrior);
        let err = "next".parse::<Period>().unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Validation error: Invalid period: next");
        assert_eq!(Period::PriorPrior.to_string(), "prior_prior");
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year(Some("2023.01.01 ~ 2023.12.31")), Some("2023".to_string()));
        assert_eq!(extract_year(Some("제 55 기")), None);
        assert_eq!(extract_year(None), None);
    }

    #[test]
    fn test_period_labels() {
        let items = vec![LineItem::new(
            ConsolidationScope::Consolidated,
            StatementType::BalanceSheet,
            "자산총계",
        )
        .with_dates("2023.12.31 현재", "2022.12.31 현재", "")];

        let labels = PeriodLabels::from_items(&items);
        assert_eq!(labels.get(Period::Current), "2023");
        assert_eq!(labels.get(Period::Prior), "2022");
        assert_eq!(labels.get(Period::PriorPrior), "전전기");
        assert_eq!(PeriodLabels::from_items(&[]), PeriodLabels::default());
    }
}
