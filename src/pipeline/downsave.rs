//! Down-save: convert the modern container to the legacy Word 97-2003 format.
//!
//! ## Why a subprocess?
//!
//! No Rust crate writes the binary `.doc` container, so the down-save step
//! shells out to a headless LibreOffice (`soffice --convert-to doc`), the
//! same converter the original product shipped with. The container bytes go
//! through a [`tempfile::TempDir`] because the converter only speaks
//! file paths; the directory is cleaned up on drop even if the process
//! panics.
//!
//! When no converter binary is installed, [`DownsaveMode::Auto`] falls back
//! to emitting the modern container bytes under the `.doc` name — Word
//! opens those fine — while [`DownsaveMode::Require`] turns the missing
//! binary into a `WriteFailed`.

use crate::config::{ConversionConfig, DownsaveMode};
use crate::error::ConvertError;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Candidate converter binaries, tried in order.
const CONVERTER_BINARIES: &[&str] = &["soffice", "libreoffice"];

/// Convert OOXML container bytes to the legacy format per the configured
/// mode.
///
/// Returns the output bytes and whether the down-save actually ran.
pub fn downsave(
    docx_bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<(Vec<u8>, bool), ConvertError> {
    match config.downsave {
        DownsaveMode::Skip => Ok((docx_bytes, false)),
        DownsaveMode::Auto => match find_converter() {
            Some(converter) => run_converter(&converter, &docx_bytes, config).map(|b| (b, true)),
            None => {
                warn!("no LibreOffice binary on PATH; emitting modern container under .doc name");
                Ok((docx_bytes, false))
            }
        },
        DownsaveMode::Require => {
            let converter = find_converter().ok_or_else(|| ConvertError::WriteFailed {
                detail: "legacy down-save required but no soffice/libreoffice binary found on PATH"
                    .into(),
            })?;
            run_converter(&converter, &docx_bytes, config).map(|b| (b, true))
        }
    }
}

/// Locate the first converter binary present on PATH.
fn find_converter() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        for name in CONVERTER_BINARIES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Run the converter over a temp copy of the container and read back the
/// `.doc` it produces.
fn run_converter(
    converter: &PathBuf,
    docx_bytes: &[u8],
    config: &ConversionConfig,
) -> Result<Vec<u8>, ConvertError> {
    let temp_dir = tempfile::tempdir().map_err(|e| ConvertError::WriteFailed {
        detail: format!("temp dir: {e}"),
    })?;
    let docx_path = temp_dir.path().join("document.docx");
    let doc_path = temp_dir.path().join("document.doc");

    std::fs::write(&docx_path, docx_bytes).map_err(|e| ConvertError::WriteFailed {
        detail: format!("temp write: {e}"),
    })?;

    debug!(converter = %converter.display(), "running legacy down-save");
    let mut child = Command::new(converter)
        .arg("--headless")
        .arg("--convert-to")
        .arg("doc")
        .arg("--outdir")
        .arg(temp_dir.path())
        .arg(&docx_path)
        .env("HOME", temp_dir.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ConvertError::WriteFailed {
            detail: format!("failed to launch converter: {e}"),
        })?;

    let status = wait_with_timeout(&mut child, Duration::from_secs(config.soffice_timeout_secs))?;
    if !status.success() {
        return Err(ConvertError::WriteFailed {
            detail: format!("converter exited with {status}"),
        });
    }

    let bytes = std::fs::read(&doc_path).map_err(|e| ConvertError::WriteFailed {
        detail: format!("converter produced no output: {e}"),
    })?;

    info!(bytes = bytes.len(), "legacy down-save complete");
    Ok(bytes)
}

/// Poll the child until it exits or the deadline passes; kill it on timeout.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ConvertError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ConvertError::WriteFailed {
                        detail: format!("converter timed out after {}s", timeout.as_secs()),
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                return Err(ConvertError::WriteFailed {
                    detail: format!("failed to wait for converter: {e}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // PATH is process-global; tests that rewrite it must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn skip_mode_passes_bytes_through() {
        let config = ConversionConfig::builder()
            .downsave(DownsaveMode::Skip)
            .build();
        let bytes = vec![1, 2, 3];
        let (out, ran) = downsave(bytes.clone(), &config).unwrap();
        assert_eq!(out, bytes);
        assert!(!ran);
    }

    #[test]
    fn require_mode_fails_without_converter() {
        let _guard = ENV_LOCK.lock().unwrap();
        // Point PATH at an empty dir so no converter can be found.
        let empty = tempfile::tempdir().unwrap();
        let old_path = std::env::var_os("PATH");
        std::env::set_var("PATH", empty.path());

        let config = ConversionConfig::builder()
            .downsave(DownsaveMode::Require)
            .build();
        let result = downsave(vec![0u8; 4], &config);

        match old_path {
            Some(p) => std::env::set_var("PATH", p),
            None => std::env::remove_var("PATH"),
        }

        let err = result.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::WriteFailed);
    }

    #[test]
    fn auto_mode_falls_back_without_converter() {
        let _guard = ENV_LOCK.lock().unwrap();
        let empty = tempfile::tempdir().unwrap();
        let old_path = std::env::var_os("PATH");
        std::env::set_var("PATH", empty.path());

        let config = ConversionConfig::default();
        let result = downsave(vec![9u8; 8], &config);

        match old_path {
            Some(p) => std::env::set_var("PATH", p),
            None => std::env::remove_var("PATH"),
        }

        let (out, ran) = result.unwrap();
        assert_eq!(out, vec![9u8; 8]);
        assert!(!ran);
    }
}
