//! # pdf2doc-bot
//!
//! Convert PDF documents to legacy Microsoft Word (`.doc`, 97-2003) files,
//! delivered as a Telegram bot.
//!
//! ## Why this crate?
//!
//! People still get asked for "a Word version" of PDFs. This crate extracts
//! the text layer and any tab/space-aligned tables from a text-based PDF and
//! rebuilds them as an editable Word document, keeping page boundaries and
//! table structure. It does not do OCR and it does not reconstruct complex
//! layouts — scanned or image-only PDFs fail with a clean error.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF upload
//!  │
//!  ├─ 1. Validate  size ≤ 20 MiB, .pdf extension, %PDF magic
//!  ├─ 2. Extract   per-page text via lopdf
//!  ├─ 3. Segment   paragraph / table blocks (deterministic text rules)
//!  ├─ 4. Write     OOXML container via docx-rs
//!  └─ 5. Downsave  legacy .doc via headless LibreOffice
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2doc_bot::{convert, ConversionConfig, RawInput};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("document.pdf")?;
//!     let input = RawInput::new(bytes, "document.pdf");
//!     let output = convert(&input, &ConversionConfig::default())?;
//!     std::fs::write(&output.file_name, &output.bytes)?;
//!     eprintln!(
//!         "{} pages, {} tables, {} bytes",
//!         output.stats.page_count,
//!         output.stats.table_blocks,
//!         output.stats.output_bytes
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `bot`   | on      | Enables the `pdf2doc-bot` binary (teloxide + tokio + clap) |
//!
//! Disable `bot` when using only the conversion library to avoid pulling in
//! the Telegram stack:
//! ```toml
//! pdf2doc-bot = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

#[cfg(feature = "bot")]
pub mod bot;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod stats;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DownsaveMode};
pub use convert::convert;
pub use error::{ConvertError, ErrorKind};
pub use model::{Block, ConversionOutput, ConversionStats, DocumentModel, PageContent, RawInput};
pub use stats::{InMemoryStats, StatsStore};
