//! Inline span tokenizer
//!
//! Two passes: `**emphasis**` pairs become [`Span::Keyword`], then every plain
//! remainder is re-split around Korean-unit currency mentions (`12.5조원`,
//! `3,000억`, `500만원`). Unmatched markers are left as literal text.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::types::Span;

fn emphasis_regex() -> &'static Regex {
    static EMPHASIS: OnceCell<Regex> = OnceCell::new();
    EMPHASIS.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

fn amount_regex() -> &'static Regex {
    static AMOUNT: OnceCell<Regex> = OnceCell::new();
    AMOUNT.get_or_init(|| Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?[조억만]원?").unwrap())
}

/// Split one line into styled spans.
///
/// Concatenating the span texts gives back `text` with every matched `**`
/// pair removed. Text without any marker comes back as a single plain span.
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    if text.is_empty() {
        return spans;
    }

    let mut last = 0;
    for caps in emphasis_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            split_amounts(&text[last..whole.start()], &mut spans);
        }
        spans.push(Span::keyword(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        split_amounts(&text[last..], &mut spans);
    }

    spans
}

/// Currency pass over a plain remainder
fn split_amounts(text: &str, spans: &mut Vec<Span>) {
    let mut last = 0;
    for m in amount_regex().find_iter(text) {
        if m.start() > last {
            spans.push(Span::plain(&text[last..m.start()]));
        }
        spans.push(Span::amount(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }
}

/// Remove every `**` marker from a line
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

// ==================== Tests ====================
