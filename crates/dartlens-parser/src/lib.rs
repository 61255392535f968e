//! Narrative markup parser
//!
//! Generated investment reports are loosely formatted text: numbered section
//! headers, bullet lists, an "investment points" table of strengths and
//! weaknesses, a grade line, emphasized keywords and currency mentions. This
//! crate classifies each line and assembles the result into a typed
//! [`Document`] tree. Parsing never fails; unrecognized lines become
//! paragraphs.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod inline;
pub mod types;

pub use assembler::DocumentAssembler;
pub use classifier::{classify, classify_raw, preprocess, LineEvent};
pub use error::ParseError;
pub use inline::tokenize;
pub use types::{spans_text, Block, Document, Grade, Span, TABLE_HEADERS};

/// Parse a whole narrative, line by line
pub fn parse_narrative(text: &str) -> Document {
    let mut assembler = DocumentAssembler::new();
    for raw in text.lines() {
        if let Some(event) = classify_raw(raw, assembler.table_open()) {
            assembler.push(event);
        }
    }
    let document = assembler.finish();
    log::debug!("parsed narrative into {} top-level blocks", document.len());
    document
}

// ==================== Parser Trait ====================

/// Parser reference type
pub type ParserRef = Arc<dyn NarrativeParserTrait>;

/// Trait for narrative parsers
#[async_trait]
pub trait NarrativeParserTrait: Send + Sync {
    /// Parse narrative text
    fn parse(&self, text: &str) -> Document;

    /// Parse a narrative stored in a UTF-8 text file
    async fn parse_file(&self, path: PathBuf) -> Result<Document, ParseError>;
}

/// Default parser implementation
#[derive(Debug, Default)]
pub struct DefaultNarrativeParser;

#[async_trait]
impl NarrativeParserTrait for DefaultNarrativeParser {
    fn parse(&self, text: &str) -> Document {
        parse_narrative(text)
    }

    async fn parse_file(&self, path: PathBuf) -> Result<Document, ParseError> {
        let bytes = tokio::fs::read(&path).await?;
        let text = String::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding {
            path: path.to_string_lossy().to_string(),
        })?;
        Ok(self.parse(&text))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SUMMARY: &str = "1. 요약
**투자 포인트**:
강점: 높은 영업이익률
약점: 높은 부채비율
- 시장 점유율 1위
**투자 등급**: 매수";

    #[test]
    fn test_summary_example() {
        let doc = parse_narrative(SUMMARY);

        let expected = Document::new(vec![Block::Section {
            title: "요약".to_string(),
            content: vec![
                Block::Table {
                    headers: vec!["구분".to_string(), "내용".to_string()],
                    rows: vec![
                        vec![vec![Span::plain("강점")], vec![Span::plain("높은영업이익률")]],
                        vec![vec![Span::plain("약점")], vec![Span::plain("높은부채비율")]],
                    ],
                },
                Block::List {
                    items: vec![vec![Span::plain("시장 점유율 1위")]],
                },
                Block::GradeBadge { grade: Grade::Buy },
            ],
        }]);
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_generated_report_layout() {
        let text = "━━━━━━━━━━━━━━━━━━━━
📊 1. 재무제표 핵심 분석
━━━━━━━━━━━━━━━━━━━━
- 자산/부채/자본 구조 평가
**매출액** 302.2조원으로 전년 대비 증가

💡 4. 종합 투자 의견
**투자 등급**: 보유
**투자 포인트**:
✅ 강점 3가지
❌ 약점: 환율 민감도
**목표가 및 전략**:
- 적정 목표 주가 9만원
**리스크 요인**:";
        let doc = parse_narrative(text);

        assert_eq!(doc.section_titles(), vec!["재무제표 핵심 분석", "종합 투자 의견"]);
        assert_eq!(doc.grade(), Some(Grade::Hold));

        let Block::Section { content, .. } = &doc.blocks[0] else {
            panic!("expected section");
        };
        assert_eq!(
            content[1],
            Block::Paragraph {
                content: vec![
                    Span::keyword("매출액"),
                    Span::plain(" "),
                    Span::amount("302.2조원"),
                    Span::plain("으로 전년 대비 증가"),
                ],
            }
        );

        let Block::Section { content, .. } = &doc.blocks[1] else {
            panic!("expected section");
        };
        let kinds: Vec<&str> = content.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec!["grade_badge", "table", "highlight_box", "list", "highlight_box"]
        );
        assert_eq!(
            content[2],
            Block::HighlightBox { content: vec![Span::plain("목표가 및 전략:")] }
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_narrative("").is_empty());
        assert!(parse_narrative("\n  \n━━━\n").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let doc = parse_narrative("1. 개요\r\n본문\r\n");
        assert_eq!(doc.section_titles(), vec!["개요"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_narrative(SUMMARY), parse_narrative(SUMMARY));
    }

    #[tokio::test]
    async fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SUMMARY.as_bytes()).unwrap();

        let parser = DefaultNarrativeParser;
        let doc = parser.parse_file(file.path().to_path_buf()).await.unwrap();
        assert_eq!(doc.grade(), Some(Grade::Buy));
    }

    #[tokio::test]
    async fn test_parse_file_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let parser = DefaultNarrativeParser;
        let result = parser.parse_file(file.path().to_path_buf()).await;
        assert!(matches!(result, Err(ParseError::InvalidEncoding { .. })));
    }
}
