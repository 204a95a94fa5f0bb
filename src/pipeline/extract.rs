//! Extraction: parse PDF bytes and pull each page's text in document order.
//!
//! ## Why lopdf?
//!
//! The bot only needs the text layer — no rasterisation, no OCR — and
//! `lopdf` parses directly from an in-memory buffer, so the uploaded bytes
//! never have to touch disk. Encrypted documents are rejected up front:
//! `extract_text` on an encrypted file produces ciphertext garbage, which is
//! worse than a clean failure.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::model::{DocumentModel, PageContent};
use crate::pipeline::segment;
use lopdf::Document;
use tracing::{debug, warn};

/// Extract a structured [`DocumentModel`] from raw PDF bytes.
///
/// # Errors
/// * [`ConvertError::Unreadable`] — the bytes are not a parseable PDF, or
///   the document is encrypted.
/// * [`ConvertError::Empty`] — the document has no pages, or no page
///   contributed a non-empty block.
pub fn extract(bytes: &[u8], config: &ConversionConfig) -> Result<DocumentModel, ConvertError> {
    let doc = Document::load_mem(bytes).map_err(|e| ConvertError::Unreadable {
        detail: e.to_string(),
    })?;

    if doc.is_encrypted() {
        return Err(ConvertError::Unreadable {
            detail: "document is encrypted".into(),
        });
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(ConvertError::Empty);
    }

    let mut pages = Vec::with_capacity(page_numbers.len());
    for (index, page_number) in page_numbers.iter().enumerate() {
        // A page whose text layer fails to decode contributes no blocks;
        // that is only an error when true of the whole document.
        let text = match doc.extract_text(&[*page_number]) {
            Ok(text) => text,
            Err(e) => {
                warn!(page = index + 1, error = %e, "page text extraction failed");
                String::new()
            }
        };

        let blocks = segment::segment_page(&text, config);
        debug!(page = index + 1, blocks = blocks.len(), "page segmented");
        pages.push(PageContent {
            number: index + 1,
            blocks,
        });
    }

    let model = DocumentModel { pages };
    if model.is_empty() {
        return Err(ConvertError::Empty);
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn garbage_bytes_are_unreadable() {
        let config = ConversionConfig::default();
        let err = extract(b"%PDF-1.5 but not really a pdf", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);
    }

    #[test]
    fn empty_bytes_are_unreadable() {
        let config = ConversionConfig::default();
        let err = extract(&[], &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);
    }

    // Extraction against real generated PDFs is covered by tests/pipeline.rs,
    // which builds documents with lopdf and runs the whole pipeline.
}
