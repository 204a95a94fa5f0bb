//! Writer: assemble a Word container from the block model.
//!
//! Emits the modern OOXML container via `docx-rs`; the legacy 97-2003
//! down-save is a separate stage ([`crate::pipeline::downsave`]) so the
//! container assembly stays a pure in-memory transformation.
//!
//! Layout rules: a text block becomes one default-styled paragraph; a table
//! block becomes a grid table whose column count is the longest row, with
//! short rows padded by empty trailing cells; consecutive pages are
//! separated by an explicit page break (K pages → K−1 breaks).

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::model::{Block, DocumentModel};
use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::io::Cursor;
use tracing::debug;

/// Total table width distributed across columns, in twentieths of a point
/// (~16 cm printable width on an A4 page).
const TABLE_WIDTH_TWIPS: usize = 9000;

/// Render the model into OOXML container bytes.
///
/// Construction never fails on a well-formed model; only a fault inside the
/// container packer surfaces, as [`ConvertError::WriteFailed`].
pub fn write(model: &DocumentModel, config: &ConversionConfig) -> Result<Vec<u8>, ConvertError> {
    let mut docx = Docx::new();

    if let Some(ref title) = config.title {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(title.as_str()).bold().size(32))
                .style("Heading1"),
        );
    }

    for (i, page) in model.pages.iter().enumerate() {
        if i > 0 {
            docx = docx
                .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
        }

        if config.page_headers {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("Page {}", page.number))
                        .bold()
                        .size(20),
                ),
            );
        }

        for block in &page.blocks {
            docx = match block {
                Block::Text { text } => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
                }
                Block::Table { rows } => docx.add_table(build_table(rows)),
            };
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ConvertError::WriteFailed {
            detail: e.to_string(),
        })?;

    let bytes = cursor.into_inner();
    debug!(bytes = bytes.len(), pages = model.pages.len(), "container assembled");
    Ok(bytes)
}

/// Build a grid table: column count is the longest row, shorter rows are
/// padded with empty trailing cells.
fn build_table(rows: &[Vec<String>]) -> Table {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);

    let table_rows: Vec<TableRow> = rows
        .iter()
        .map(|row| {
            let cells: Vec<TableCell> = (0..columns)
                .map(|col| {
                    let text = row.get(col).map(String::as_str).unwrap_or("");
                    TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(table_rows).set_grid(vec![TABLE_WIDTH_TWIPS / columns; columns])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageContent;
    use std::io::Read;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn page(number: usize, blocks: Vec<Block>) -> PageContent {
        PageContent { number, blocks }
    }

    fn text(s: &str) -> Block {
        Block::Text { text: s.into() }
    }

    #[test]
    fn produces_a_zip_container() {
        let model = DocumentModel {
            pages: vec![page(1, vec![text("hello")])],
        };
        let bytes = write(&model, &ConversionConfig::default()).unwrap();
        assert!(bytes.starts_with(b"PK"), "OOXML output must be a zip");
        assert!(document_xml(&bytes).contains("hello"));
    }

    #[test]
    fn page_break_count_is_pages_minus_one() {
        let model = DocumentModel {
            pages: vec![
                page(1, vec![text("one")]),
                page(2, vec![text("two")]),
                page(3, vec![text("three")]),
            ],
        };
        let bytes = write(&model, &ConversionConfig::default()).unwrap();
        let xml = document_xml(&bytes);
        assert_eq!(xml.matches(r#"w:type="page""#).count(), 2);
    }

    #[test]
    fn single_page_has_no_break() {
        let model = DocumentModel {
            pages: vec![page(1, vec![text("only")])],
        };
        let bytes = write(&model, &ConversionConfig::default()).unwrap();
        assert_eq!(document_xml(&bytes).matches(r#"w:type="page""#).count(), 0);
    }

    #[test]
    fn ragged_rows_are_padded_to_longest() {
        let model = DocumentModel {
            pages: vec![page(
                1,
                vec![Block::Table {
                    rows: vec![
                        vec!["a".into(), "b".into(), "c".into()],
                        vec!["d".into()],
                    ],
                }],
            )],
        };
        let bytes = write(&model, &ConversionConfig::default()).unwrap();
        let xml = document_xml(&bytes);
        // Two rows of three cells each.
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 6);
    }

    #[test]
    fn title_and_page_headers_are_optional() {
        let model = DocumentModel {
            pages: vec![page(1, vec![text("body")])],
        };

        let plain = write(&model, &ConversionConfig::default()).unwrap();
        assert!(!document_xml(&plain).contains("Page 1"));

        let config = ConversionConfig::builder()
            .title("Converted from PDF")
            .page_headers(true)
            .build();
        let decorated = write(&model, &config).unwrap();
        let xml = document_xml(&decorated);
        assert!(xml.contains("Converted from PDF"));
        assert!(xml.contains("Page 1"));
    }
}
