//! Document tree produced by the narrative parser

use serde::{Deserialize, Serialize};

/// Header row used for the strength/weakness table
pub const TABLE_HEADERS: [&str; 2] = ["구분", "내용"];

/// Inline text fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    /// Unstyled text
    Plain { text: String },
    /// Text that was wrapped in `**` emphasis markers
    Keyword { text: String },
    /// Korean-unit currency mention such as `3.5조원`
    Amount { text: String },
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::Plain { text: text.into() }
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Span::Keyword { text: text.into() }
    }

    pub fn amount(text: impl Into<String>) -> Self {
        Span::Amount { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Span::Plain { text } | Span::Keyword { text } | Span::Amount { text } => text,
        }
    }
}

/// Concatenate span texts back into a line
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Investment grade named by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Buy,
    Hold,
    Sell,
}

impl Grade {
    /// Map the Korean grade word used in reports
    pub fn from_korean(word: &str) -> Option<Self> {
        match word {
            "매수" => Some(Grade::Buy),
            "보유" => Some(Grade::Hold),
            "매도" => Some(Grade::Sell),
            _ => None,
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            Grade::Buy => "매수",
            Grade::Hold => "보유",
            Grade::Sell => "매도",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::Buy => write!(f, "buy"),
            Grade::Hold => write!(f, "hold"),
            Grade::Sell => write!(f, "sell"),
        }
    }
}

/// Block-level element of a parsed narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { title: String, content: Vec<Block> },
    Table { headers: Vec<String>, rows: Vec<Vec<Vec<Span>>> },
    List { items: Vec<Vec<Span>> },
    HighlightBox { content: Vec<Span> },
    GradeBadge { grade: Grade },
    Paragraph { content: Vec<Span> },
}

impl Block {
    /// Short name of the block kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Section { .. } => "section",
            Block::Table { .. } => "table",
            Block::List { .. } => "list",
            Block::HighlightBox { .. } => "highlight_box",
            Block::GradeBadge { .. } => "grade_badge",
            Block::Paragraph { .. } => "paragraph",
        }
    }
}

/// Parsed narrative: an ordered list of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Titles of the top-level sections, in order
    pub fn section_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First grade badge anywhere in the document
    pub fn grade(&self) -> Option<Grade> {
        fn find(blocks: &[Block]) -> Option<Grade> {
            blocks.iter().find_map(|b| match b {
                Block::GradeBadge { grade } => Some(*grade),
                Block::Section { content, .. } => find(content),
                _ => None,
            })
        }
        find(&self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_korean() {
        assert_eq!(Grade::from_korean("매수"), Some(Grade::Buy));
        assert_eq!(Grade::from_korean("보유"), Some(Grade::Hold));
        assert_eq!(Grade::from_korean("매도"), Some(Grade::Sell));
        assert_eq!(Grade::from_korean("관망"), None);
        assert_eq!(Grade::Sell.korean_label(), "매도");
    }

    #[test]
    fn test_spans_text() {
        let spans = vec![Span::plain("매출 "), Span::amount("3조원"), Span::keyword("증가")];
        assert_eq!(spans_text(&spans), "매출 3조원증가");
    }

    #[test]
    fn test_document_grade_nested() {
        let doc = Document::new(vec![Block::Section {
            title: "의견".to_string(),
            content: vec![Block::GradeBadge { grade: Grade::Hold }],
        }]);
        assert_eq!(doc.grade(), Some(Grade::Hold));
        assert_eq!(doc.section_titles(), vec!["의견"]);
    }

    #[test]
    fn test_block_serialization_tags() {
        let block = Block::Paragraph { content: vec![Span::keyword("ROE")] };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["content"][0]["kind"], "keyword");
        assert_eq!(json["content"][0]["text"], "ROE");
    }
}
