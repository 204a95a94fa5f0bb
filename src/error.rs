//! Error types for the pdf2doc-bot library.
//!
//! Every failure a conversion can hit is a variant of [`ConvertError`],
//! returned as `Err(ConvertError)` from [`crate::convert::convert`] — the
//! pipeline never panics on malformed input. Faults raised inside the PDF
//! parser or the Word container writer are caught at the extractor/writer
//! boundary and converted to the matching variant here rather than allowed
//! to escape as library-specific error types.
//!
//! The gateway does not match on variants directly; it calls
//! [`ConvertError::kind`] and maps the closed [`ErrorKind`] set to
//! user-facing text. Keeping the kind separate from the error means new
//! context fields can be added to a variant without touching the gateway.

use thiserror::Error;

/// All errors returned by the conversion pipeline.
///
/// Every variant is terminal for its invocation: there are no retries, and
/// the caller may simply resubmit a new input.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// Declared input size exceeds the configured maximum.
    #[error("File is too large: {size} bytes (maximum {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    /// The file name does not carry a `.pdf` extension, or the content
    /// sniff disagrees with the extension.
    #[error("Unsupported file type: '{file_name}' — only PDF files are accepted")]
    UnsupportedType { file_name: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The byte sequence is not a parseable PDF structure.
    #[error("Could not read PDF: {detail}")]
    Unreadable { detail: String },

    /// Extraction yielded zero pages or zero non-empty blocks.
    ///
    /// Scanned PDFs land here: their pages contain only images, and the
    /// pipeline does not attempt OCR.
    #[error("No extractable text or tables found in the document")]
    Empty,

    // ── Writer errors ─────────────────────────────────────────────────────
    /// The Word container could not be assembled or down-saved.
    #[error("Failed to write Word document: {detail}")]
    WriteFailed { detail: String },
}

impl ConvertError {
    /// The closed category set the gateway translates into user-facing text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::TooLarge { .. } => ErrorKind::TooLarge,
            ConvertError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            ConvertError::Unreadable { .. } => ErrorKind::Unreadable,
            ConvertError::Empty => ErrorKind::Empty,
            ConvertError::WriteFailed { .. } => ErrorKind::WriteFailed,
        }
    }
}

/// Failure category of a conversion, independent of per-variant context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    TooLarge,
    UnsupportedType,
    Unreadable,
    Empty,
    WriteFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_display() {
        let e = ConvertError::TooLarge {
            size: 26_214_400,
            limit: 20_971_520,
        };
        let msg = e.to_string();
        assert!(msg.contains("26214400"), "got: {msg}");
        assert!(msg.contains("20971520"), "got: {msg}");
    }

    #[test]
    fn unsupported_type_display() {
        let e = ConvertError::UnsupportedType {
            file_name: "notes.txt".into(),
        };
        assert!(e.to_string().contains("notes.txt"));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            ConvertError::Unreadable { detail: "x".into() }.kind(),
            ErrorKind::Unreadable
        );
        assert_eq!(ConvertError::Empty.kind(), ErrorKind::Empty);
        assert_eq!(
            ConvertError::WriteFailed { detail: "x".into() }.kind(),
            ErrorKind::WriteFailed
        );
    }
}
