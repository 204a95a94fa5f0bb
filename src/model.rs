//! Intermediate representation of a converted document.
//!
//! The extractor produces a [`DocumentModel`]; the writer consumes it. The
//! model is purely transient: one is built per conversion, owned exclusively
//! by that invocation, and dropped when the output bytes exist (or when any
//! stage fails). Nothing here is persisted or shared across requests.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw uploaded file plus metadata, as received by the pipeline.
///
/// `size` is the size declared by the messaging platform, which is available
/// before the bytes are downloaded — validation checks the declared size so
/// an oversized file can be rejected without fetching it.
#[derive(Debug, Clone)]
pub struct RawInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub size: u64,
}

impl RawInput {
    /// Build an input whose declared size is the actual byte length.
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let size = bytes.len() as u64;
        Self {
            bytes,
            file_name: file_name.into(),
            size,
        }
    }

    /// Lower-cased extension of the declared file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Name for the converted output: the input stem with a `.doc` extension.
    pub fn output_file_name(&self) -> String {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("converted");
        format!("{stem}.doc")
    }
}

/// Smallest extracted content unit from a PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A contiguous run of free text, emitted as one paragraph.
    Text { text: String },
    /// A detected table. Rows need not be rectangular; the writer pads
    /// short rows with empty trailing cells.
    Table { rows: Vec<Vec<String>> },
}

impl Block {
    /// True when the block carries no visible content.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Text { text } => text.trim().is_empty(),
            Block::Table { rows } => rows
                .iter()
                .all(|row| row.iter().all(|cell| cell.trim().is_empty())),
        }
    }
}

/// Ordered blocks extracted from one page. `number` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub number: usize,
    pub blocks: Vec<Block>,
}

/// Full structured representation of one converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DocumentModel {
    pub pages: Vec<PageContent>,
}

impl DocumentModel {
    /// Count of non-empty blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .filter(|b| !b.is_empty())
            .count()
    }

    /// True when no page contributed a non-empty block.
    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }

    /// Count of blocks matching `pred` across all pages.
    fn count_blocks(&self, pred: impl Fn(&Block) -> bool) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .filter(|b| pred(b))
            .count()
    }

    pub fn text_block_count(&self) -> usize {
        self.count_blocks(|b| matches!(b, Block::Text { .. }))
    }

    pub fn table_block_count(&self) -> usize {
        self.count_blocks(|b| matches!(b, Block::Table { .. }))
    }
}

/// Statistics about a completed conversion.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConversionStats {
    /// Pages in the source document.
    pub page_count: usize,
    /// Free-text blocks extracted.
    pub text_blocks: usize,
    /// Tables extracted.
    pub table_blocks: usize,
    /// Size of the produced document in bytes.
    pub output_bytes: usize,
    /// Whether the legacy down-save step actually ran (see
    /// [`crate::config::DownsaveMode`]).
    pub downsaved: bool,
    /// Wall-clock time spent extracting, in milliseconds.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent writing (including down-save), in milliseconds.
    pub write_duration_ms: u64,
    /// Total wall-clock time, in milliseconds.
    pub total_duration_ms: u64,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Suggested file name for the produced document.
    pub file_name: String,
    /// The Word document bytes.
    pub bytes: Vec<u8>,
    pub stats: ConversionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        let input = RawInput::new(vec![], "Report.PDF");
        assert_eq!(input.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn output_file_name_swaps_extension() {
        assert_eq!(
            RawInput::new(vec![], "report.pdf").output_file_name(),
            "report.doc"
        );
        assert_eq!(
            RawInput::new(vec![], "archive.2024.PDF").output_file_name(),
            "archive.2024.doc"
        );
        assert_eq!(RawInput::new(vec![], "").output_file_name(), "converted.doc");
    }

    #[test]
    fn whitespace_blocks_are_empty() {
        assert!(Block::Text { text: "  \n ".into() }.is_empty());
        assert!(Block::Table {
            rows: vec![vec!["".into(), " ".into()]]
        }
        .is_empty());
        assert!(!Block::Text { text: "hello".into() }.is_empty());
    }

    #[test]
    fn model_counts_skip_empty_blocks() {
        let model = DocumentModel {
            pages: vec![PageContent {
                number: 1,
                blocks: vec![
                    Block::Text { text: "a".into() },
                    Block::Text { text: "   ".into() },
                    Block::Table {
                        rows: vec![vec!["x".into()]],
                    },
                ],
            }],
        };
        assert_eq!(model.block_count(), 2);
        assert!(!model.is_empty());
        assert_eq!(model.text_block_count(), 2);
        assert_eq!(model.table_block_count(), 1);
    }
}
