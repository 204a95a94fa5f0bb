//! Conversion entry point: orchestrate validate → extract → write → downsave.
//!
//! One call converts one input. The pipeline holds no state across
//! invocations and the intermediate [`crate::model::DocumentModel`] is owned
//! exclusively by the call — a failure at any stage discards it and returns
//! the typed error; there are no retries and no partial output.
//!
//! The whole function is synchronous and blocking. Async callers (the bot
//! gateway) run it inside `tokio::task::spawn_blocking`, the same isolation
//! the overall request timeout lives behind.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::model::{ConversionOutput, ConversionStats, RawInput};
use crate::pipeline::{downsave, extract, validate, write};
use std::time::Instant;
use tracing::info;

/// Convert a PDF upload into a legacy Word document.
///
/// # Errors
/// Returns the first failing check, in validation order:
/// `TooLarge`, `UnsupportedType`, then extraction (`Unreadable`, `Empty`)
/// and writer (`WriteFailed`) failures, propagated unchanged.
pub fn convert(
    input: &RawInput,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    info!(file_name = %input.file_name, size = input.size, "starting conversion");

    // ── Step 1: Validate ─────────────────────────────────────────────────
    validate::validate(input, config)?;

    // ── Step 2: Extract ──────────────────────────────────────────────────
    let extract_start = Instant::now();
    let model = extract::extract(&input.bytes, config)?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    info!(
        pages = model.pages.len(),
        blocks = model.block_count(),
        duration_ms = extract_duration_ms,
        "extraction complete"
    );

    // ── Step 3: Write + down-save ────────────────────────────────────────
    let write_start = Instant::now();
    let container = write::write(&model, config)?;
    let (bytes, downsaved) = downsave::downsave(container, config)?;
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    let stats = ConversionStats {
        page_count: model.pages.len(),
        text_blocks: model.text_block_count(),
        table_blocks: model.table_block_count(),
        output_bytes: bytes.len(),
        downsaved,
        extract_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        output_bytes = stats.output_bytes,
        downsaved = stats.downsaved,
        total_ms = stats.total_duration_ms,
        "conversion complete"
    );

    Ok(ConversionOutput {
        file_name: input.output_file_name(),
        bytes,
        stats,
    })
}
