//! Document assembler
//!
//! A small state machine folding [`LineEvent`]s into a [`Document`]. The scope
//! (`Idle` or inside a section) and the open collector (nothing, a table, or a
//! list) are separate tagged values; every transition that closes a collector
//! or a section goes through a dedicated flush method, so a block is final the
//! moment it is emitted.

use crate::classifier::LineEvent;
use crate::inline::tokenize;
use crate::types::{Block, Document, Span, TABLE_HEADERS};

/// Where emitted blocks currently land
#[derive(Debug)]
enum Scope {
    /// Top level of the document
    Idle,
    /// Inside a numbered section
    InSection { title: String, content: Vec<Block> },
}

/// Multi-line block being accumulated
#[derive(Debug)]
enum Collector {
    Nothing,
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    List {
        items: Vec<Vec<Span>>,
    },
}

/// Builds a document from classified lines
#[derive(Debug)]
pub struct DocumentAssembler {
    blocks: Vec<Block>,
    scope: Scope,
    collector: Collector,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            scope: Scope::Idle,
            collector: Collector::Nothing,
        }
    }

    /// Whether a strength/weakness table is accepting rows
    pub fn table_open(&self) -> bool {
        matches!(self.collector, Collector::Table { .. })
    }

    /// Apply one classified line
    pub fn push(&mut self, event: LineEvent) {
        match event {
            LineEvent::SectionHeader { title } => {
                self.flush_collector();
                self.flush_section();
                self.scope = Scope::InSection {
                    title,
                    content: Vec::new(),
                };
            }
            LineEvent::TableTrigger => {
                self.flush_collector();
                self.collector = Collector::Table {
                    headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
                    rows: Vec::new(),
                };
            }
            LineEvent::TableRow { label, content } => {
                if let Collector::Table { rows, .. } = &mut self.collector {
                    rows.push(vec![tokenize(&label), tokenize(&content)]);
                } else {
                    // Rows are only classified while a table is open
                    log::debug!("table row '{}' outside a table, kept as paragraph", label);
                    let text = format!("{} {}", label, content);
                    self.emit(Block::Paragraph { content: tokenize(&text) });
                }
            }
            LineEvent::ListItem { text } => {
                if self.table_open() {
                    self.flush_table();
                }
                let item = tokenize(&text);
                match &mut self.collector {
                    Collector::List { items } => items.push(item),
                    _ => {
                        self.collector = Collector::List { items: vec![item] };
                    }
                }
            }
            LineEvent::Grade { grade } => {
                self.flush_collector();
                self.emit(Block::GradeBadge { grade });
            }
            LineEvent::Highlight { text } => {
                self.flush_collector();
                self.emit(Block::HighlightBox { content: tokenize(&text) });
            }
            LineEvent::Text { text } => {
                self.flush_collector();
                self.emit(Block::Paragraph { content: tokenize(&text) });
            }
        }
    }

    /// Close everything still open and return the document
    pub fn finish(mut self) -> Document {
        self.flush_list();
        self.flush_table();
        self.flush_section();
        Document::new(self.blocks)
    }

    /// Append a finished block to the open section, or to the top level
    fn emit(&mut self, block: Block) {
        match &mut self.scope {
            Scope::InSection { content, .. } => content.push(block),
            Scope::Idle => self.blocks.push(block),
        }
    }

    fn flush_collector(&mut self) {
        self.flush_list();
        self.flush_table();
    }

    fn flush_list(&mut self) {
        if !matches!(self.collector, Collector::List { .. }) {
            return;
        }
        if let Collector::List { items } = std::mem::replace(&mut self.collector, Collector::Nothing) {
            if !items.is_empty() {
                self.emit(Block::List { items });
            }
        }
    }

    /// Tables without rows are dropped
    fn flush_table(&mut self) {
        if !self.table_open() {
            return;
        }
        if let Collector::Table { headers, rows } =
            std::mem::replace(&mut self.collector, Collector::Nothing)
        {
            if !rows.is_empty() {
                self.emit(Block::Table { headers, rows });
            }
        }
    }

    /// Sections are emitted even when they collected no content
    fn flush_section(&mut self) {
        if let Scope::InSection { title, content } = std::mem::replace(&mut self.scope, Scope::Idle) {
            self.blocks.push(Block::Section { title, content });
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grade;

    fn text(s: &str) -> LineEvent {
        LineEvent::Text { text: s.to_string() }
    }

    fn item(s: &str) -> LineEvent {
        LineEvent::ListItem { text: s.to_string() }
    }

    #[test]
    fn test_blocks_before_any_section_stay_top_level() {
        let mut asm = DocumentAssembler::new();
        asm.push(text("머리말"));
        asm.push(LineEvent::SectionHeader { title: "요약".to_string() });
        asm.push(text("본문"));
        let doc = asm.finish();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks[0], Block::Paragraph { content: vec![Span::plain("머리말")] });
        assert_eq!(
            doc.blocks[1],
            Block::Section {
                title: "요약".to_string(),
                content: vec![Block::Paragraph { content: vec![Span::plain("본문")] }],
            }
        );
    }

    #[test]
    fn test_empty_section_is_emitted() {
        let mut asm = DocumentAssembler::new();
        asm.push(LineEvent::SectionHeader { title: "첫째".to_string() });
        asm.push(LineEvent::SectionHeader { title: "둘째".to_string() });
        let doc = asm.finish();

        assert_eq!(doc.section_titles(), vec!["첫째", "둘째"]);
        assert!(matches!(&doc.blocks[0], Block::Section { content, .. } if content.is_empty()));
    }

    #[test]
    fn test_table_without_rows_is_dropped() {
        let mut asm = DocumentAssembler::new();
        asm.push(LineEvent::TableTrigger);
        assert!(asm.table_open());
        asm.push(text("설명"));
        assert!(!asm.table_open());
        let doc = asm.finish();

        assert_eq!(doc.blocks, vec![Block::Paragraph { content: vec![Span::plain("설명")] }]);
    }

    #[test]
    fn test_list_items_accumulate_until_other_block() {
        let mut asm = DocumentAssembler::new();
        asm.push(item("하나"));
        asm.push(item("둘"));
        asm.push(LineEvent::Grade { grade: Grade::Hold });
        asm.push(item("셋"));
        let doc = asm.finish();

        assert_eq!(
            doc.blocks,
            vec![
                Block::List { items: vec![vec![Span::plain("하나")], vec![Span::plain("둘")]] },
                Block::GradeBadge { grade: Grade::Hold },
                Block::List { items: vec![vec![Span::plain("셋")]] },
            ]
        );
    }

    #[test]
    fn test_list_item_closes_table() {
        let mut asm = DocumentAssembler::new();
        asm.push(LineEvent::TableTrigger);
        asm.push(LineEvent::TableRow {
            label: "약점".to_string(),
            content: "환율".to_string(),
        });
        asm.push(item("항목"));
        let doc = asm.finish();

        assert_eq!(doc.len(), 2);
        assert!(matches!(&doc.blocks[0], Block::Table { rows, .. } if rows.len() == 1));
        assert!(matches!(&doc.blocks[1], Block::List { .. }));
    }

    #[test]
    fn test_flushed_table_is_not_mutated_by_later_rows() {
        let mut asm = DocumentAssembler::new();
        asm.push(LineEvent::SectionHeader { title: "의견".to_string() });
        asm.push(LineEvent::TableTrigger);
        asm.push(LineEvent::TableRow {
            label: "강점".to_string(),
            content: "브랜드".to_string(),
        });
        asm.push(text("중간 문단"));
        asm.push(LineEvent::TableRow {
            label: "약점".to_string(),
            content: "원가".to_string(),
        });
        let doc = asm.finish();

        let Block::Section { content, .. } = &doc.blocks[0] else {
            panic!("expected section, got {:?}", doc.blocks[0]);
        };
        assert_eq!(content.len(), 3);
        assert!(matches!(&content[0], Block::Table { rows, .. } if rows.len() == 1));
        assert_eq!(
            content[2],
            Block::Paragraph { content: vec![Span::plain("약점 원가")] }
        );
    }
}
