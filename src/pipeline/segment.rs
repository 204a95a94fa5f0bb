//! Segmentation: deterministic rules turning a page's raw text into blocks.
//!
//! ## Why a text-level pass?
//!
//! The PDF text extractor emits one line per positioned text run, with the
//! page's vertical order preserved but no structural markup. Tables in
//! text-based PDFs surface as runs of lines whose columns are separated by
//! tabs or aligned space padding. This module applies cheap, deterministic
//! rules to recover that structure:
//!
//! 1. Normalise the text (NFC, control characters, line endings)
//! 2. Classify each line as tabular or free text
//! 3. Group consecutive tabular lines into table blocks; short groups fall
//!    back to free text
//! 4. Collapse the remaining line runs into one paragraph block per
//!    blank-line-separated region
//!
//! A line consumed by a table row is excluded from free text, so no cell
//! text is duplicated as a separate paragraph. Column-boundary detection is
//! heuristic; callers should treat exact table geometry as approximate.

use crate::config::ConversionConfig;
use crate::model::Block;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Column separators within a tabular line: a tab, or a run of two or more
/// spaces left behind by aligned layout.
static RE_CELL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t| {2,}").unwrap());

/// Control characters that PDF extraction sometimes leaks into text.
/// Newlines and tabs are kept; they carry line and cell structure.
static RE_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B-\x1F\x7F]").unwrap());

/// Segment one page's extracted text into ordered blocks.
pub fn segment_page(text: &str, config: &ConversionConfig) -> Vec<Block> {
    let text = normalise(text);
    let lines: Vec<&str> = text.lines().collect();

    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(rows) = take_table(&lines[i..], config) {
            flush_paragraph(&mut blocks, &mut paragraph);
            i += rows.len();
            blocks.push(Block::Table { rows });
            continue;
        }

        let line = lines[i].trim_end();
        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
        } else {
            paragraph.push(line);
        }
        i += 1;
    }
    flush_paragraph(&mut blocks, &mut paragraph);

    blocks.retain(|b| !b.is_empty());
    blocks
}

/// Normalise raw extracted text: NFC composition (ligatures such as `ﬁ`
/// decompose inconsistently across producers), control-character removal,
/// and uniform line endings.
fn normalise(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let unified = composed.replace("\r\n", "\n").replace('\r', "\n");
    RE_CONTROL.replace_all(&unified, " ").into_owned()
}

/// If `lines` starts with a table, return its parsed rows.
///
/// A table is `table_min_rows`+ consecutive lines that each split into
/// `table_min_columns`+ cells. Shorter groups are left for the paragraph
/// pass: a single aligned line is more often a spaced heading than a
/// one-row table.
fn take_table(lines: &[&str], config: &ConversionConfig) -> Option<Vec<Vec<String>>> {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map_while(|line| split_cells(line, config.table_min_columns))
        .collect();

    if rows.len() >= config.table_min_rows {
        Some(rows)
    } else {
        None
    }
}

/// Split a line into trimmed cells, or `None` when it has fewer than
/// `min_columns` cells and therefore is not a table row.
fn split_cells(line: &str, min_columns: usize) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cells: Vec<String> = RE_CELL_SEPARATOR
        .split(trimmed)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if cells.len() >= min_columns {
        Some(cells)
    } else {
        None
    }
}

/// Close the open paragraph, if any, and push it as a text block.
/// Lines are joined with single spaces; hard wraps inside a region are a
/// layout artefact, not content.
fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph
        .drain(..)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    blocks.push(Block::Text { text });
}
