//! Narrative line classifier
//!
//! Turns one raw line of generated text into a [`LineEvent`]. Rules are tried
//! in a fixed precedence order and the first match wins. The only piece of
//! parser state a rule depends on is whether a strength/weakness table is
//! currently open, which the caller passes in.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::inline::strip_emphasis;
use crate::types::Grade;

/// Decorative codepoints removed before classification
pub const DECORATIVE_EMOJI: &[char] = &[
    '📌', '💰', '📈', '🔍', '💡', '📊', '🟢', '🟡', '🔴', '✅', '❗', '❌', '📝', '↑', '↓', '→',
    '\u{FE0F}',
];

/// Characters that form a divider line when repeated
const RULE_CHARS: &[char] = &['━', '─', '═', '-', '=', '_', '*', '~'];

/// Row labels accepted inside an investment-points table
pub const ROW_LABELS: [&str; 3] = ["강점", "약점", "리스크"];

/// Classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// `<digits>. <title>`
    SectionHeader { title: String },
    /// `**투자 포인트**:` opens a two-column table
    TableTrigger,
    /// `강점: ...` style row while a table is open
    TableRow { label: String, content: String },
    /// `- item` or `* item`
    ListItem { text: String },
    /// `**투자 등급**: 매수`
    Grade { grade: Grade },
    /// Line carrying an emphasized target/strategy/risk keyword, markers removed
    Highlight { text: String },
    /// Anything else
    Text { text: String },
}

fn section_regex() -> &'static Regex {
    static SECTION: OnceCell<Regex> = OnceCell::new();
    SECTION.get_or_init(|| Regex::new(r"^\d+\.\s*(\D.*)$").unwrap())
}

fn table_trigger_regex() -> &'static Regex {
    static TRIGGER: OnceCell<Regex> = OnceCell::new();
    TRIGGER.get_or_init(|| Regex::new(r"^(?:\*\*투자 포인트\*\*|투자 포인트)\s*:").unwrap())
}

fn table_row_regex() -> &'static Regex {
    static ROW: OnceCell<Regex> = OnceCell::new();
    ROW.get_or_init(|| Regex::new(r"^(강점|약점|리스크)\s*(.+)$").unwrap())
}

fn list_regex() -> &'static Regex {
    static LIST: OnceCell<Regex> = OnceCell::new();
    LIST.get_or_init(|| Regex::new(r"^[-*]\s*(.+)$").unwrap())
}

fn grade_regex() -> &'static Regex {
    static GRADE: OnceCell<Regex> = OnceCell::new();
    GRADE.get_or_init(|| {
        Regex::new(r"\*\*투자 등급\*\*\s*:\s*(?:\*\*)?(매수|보유|매도)").unwrap()
    })
}

fn highlight_regex() -> &'static Regex {
    static HIGHLIGHT: OnceCell<Regex> = OnceCell::new();
    HIGHLIGHT.get_or_init(|| Regex::new(r"\*\*[^*]*(?:목표|전략|리스크)[^*]*\*\*").unwrap())
}

/// Check for a line made of one repeated rule character
pub fn is_divider(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    RULE_CHARS.contains(&first) && chars.all(|c| c == first)
}

/// Trim, drop blanks and dividers, strip decorative emoji.
///
/// Returns `None` when nothing classifiable remains.
pub fn preprocess(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_divider(trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !DECORATIVE_EMOJI.contains(c))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || is_divider(cleaned) {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Classify an already preprocessed line
pub fn classify(line: &str, table_open: bool) -> LineEvent {
    if let Some(caps) = section_regex().captures(line) {
        return LineEvent::SectionHeader {
            title: caps[1].trim().to_string(),
        };
    }

    if table_trigger_regex().is_match(line) {
        return LineEvent::TableTrigger;
    }

    if table_open {
        if let Some(caps) = table_row_regex().captures(line) {
            let content: String = caps[2]
                .chars()
                .filter(|c| *c != ':' && !c.is_whitespace())
                .collect();
            if !content.is_empty() {
                return LineEvent::TableRow {
                    label: caps[1].to_string(),
                    content,
                };
            }
        }
    }

    // `**` opens emphasis, not a bullet
    if !line.starts_with("**") {
        if let Some(caps) = list_regex().captures(line) {
            return LineEvent::ListItem {
                text: caps[1].to_string(),
            };
        }
    }

    if let Some(caps) = grade_regex().captures(line) {
        if let Some(grade) = Grade::from_korean(&caps[1]) {
            return LineEvent::Grade { grade };
        }
    }

    if highlight_regex().is_match(line) {
        return LineEvent::Highlight {
            text: strip_emphasis(line),
        };
    }

    LineEvent::Text {
        text: line.to_string(),
    }
}

/// Preprocess and classify a raw line in one step
pub fn classify_raw(raw: &str, table_open: bool) -> Option<LineEvent> {
    preprocess(raw).map(|line| classify(&line, table_open))
}

// ==================== Tests ====================
