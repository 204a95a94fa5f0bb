//! Input validation: reject inputs the pipeline should never parse.
//!
//! Checks run cheapest-first and short-circuit: the declared size is known
//! before any bytes are inspected, the extension is a string comparison, and
//! only then are the magic bytes read. First failing check wins, so a 25 MiB
//! `.txt` upload reports `TooLarge`, not `UnsupportedType`.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::model::RawInput;
use tracing::debug;

/// PDF files start with these bytes; anything else fails the sniff.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate an input against the configured constraints.
pub fn validate(input: &RawInput, config: &ConversionConfig) -> Result<(), ConvertError> {
    if input.size > config.max_file_size {
        return Err(ConvertError::TooLarge {
            size: input.size,
            limit: config.max_file_size,
        });
    }

    if input.extension().as_deref() != Some("pdf") {
        return Err(ConvertError::UnsupportedType {
            file_name: input.file_name.clone(),
        });
    }

    // The sniff catches renamed files: extension says PDF, content disagrees.
    if config.sniff_magic && !input.bytes.starts_with(PDF_MAGIC) {
        return Err(ConvertError::UnsupportedType {
            file_name: input.file_name.clone(),
        });
    }

    debug!(
        file_name = %input.file_name,
        size = input.size,
        "input passed validation"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pdf_input(size: u64) -> RawInput {
        RawInput {
            bytes: b"%PDF-1.5 fake".to_vec(),
            file_name: "doc.pdf".into(),
            size,
        }
    }

    #[test]
    fn accepts_small_pdf() {
        let config = ConversionConfig::default();
        assert!(validate(&pdf_input(1024), &config).is_ok());
    }

    #[test]
    fn oversized_input_is_too_large() {
        let config = ConversionConfig::default();
        let err = validate(&pdf_input(25 * 1024 * 1024), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooLarge);
    }

    #[test]
    fn size_check_wins_over_extension_check() {
        // A 25 MiB .txt file must report TooLarge, not UnsupportedType.
        let config = ConversionConfig::default();
        let input = RawInput {
            bytes: vec![],
            file_name: "huge.txt".into(),
            size: 25 * 1024 * 1024,
        };
        assert_eq!(
            validate(&input, &config).unwrap_err().kind(),
            ErrorKind::TooLarge
        );
    }

    #[test]
    fn non_pdf_extension_is_unsupported() {
        let config = ConversionConfig::default();
        let input = RawInput::new(vec![1, 2, 3], "notes.txt");
        assert_eq!(
            validate(&input, &config).unwrap_err().kind(),
            ErrorKind::UnsupportedType
        );
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let config = ConversionConfig::default();
        let input = RawInput::new(b"%PDF-1.5".to_vec(), "README");
        assert_eq!(
            validate(&input, &config).unwrap_err().kind(),
            ErrorKind::UnsupportedType
        );
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let config = ConversionConfig::default();
        let input = RawInput::new(b"%PDF-1.5".to_vec(), "REPORT.PDF");
        assert!(validate(&input, &config).is_ok());
    }

    #[test]
    fn magic_sniff_rejects_renamed_file() {
        let config = ConversionConfig::default();
        let input = RawInput::new(b"PK\x03\x04 not a pdf".to_vec(), "sneaky.pdf");
        assert_eq!(
            validate(&input, &config).unwrap_err().kind(),
            ErrorKind::UnsupportedType
        );
    }

    #[test]
    fn sniff_can_be_disabled() {
        let config = ConversionConfig::builder().sniff_magic(false).build();
        let input = RawInput::new(b"garbage".to_vec(), "doc.pdf");
        assert!(validate(&input, &config).is_ok());
    }
}
