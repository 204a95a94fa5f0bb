//! Configuration for PDF-to-DOC conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across handler invocations and to log the
//! exact settings a conversion ran with.

use serde::{Deserialize, Serialize};

/// Default maximum accepted input size: 20 MiB, the Telegram bot API
/// download limit.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Configuration for a conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2doc_bot::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .max_file_size(5 * 1024 * 1024)
///     .page_headers(true)
///     .build();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Maximum accepted declared input size in bytes. Default: 20 MiB.
    ///
    /// The messaging platform reports a file's size before the bytes are
    /// fetched, so the pipeline can reject oversized uploads without
    /// downloading them.
    pub max_file_size: u64,

    /// Verify the `%PDF` magic bytes in addition to the extension. Default: true.
    ///
    /// A renamed `.docx` or image passes the extension check but fails the
    /// sniff, turning a confusing parser error into a clean
    /// `UnsupportedType`.
    pub sniff_magic: bool,

    /// Minimum cells per line for the line to count as a table row. Default: 2.
    pub table_min_columns: usize,

    /// Minimum consecutive table rows that form a table. Default: 2.
    ///
    /// A single aligned line is more often a heading with spaced columns
    /// than a one-row table; below this threshold the lines fall back to
    /// free text.
    pub table_min_rows: usize,

    /// How the legacy Word down-save step behaves. Default: [`DownsaveMode::Auto`].
    pub downsave: DownsaveMode,

    /// Timeout for the external converter subprocess, in seconds. Default: 60.
    pub soffice_timeout_secs: u64,

    /// Optional heading inserted at the top of the output document.
    pub title: Option<String>,

    /// Insert a "Page N" header paragraph at the start of each page. Default: false.
    pub page_headers: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            sniff_magic: true,
            table_min_columns: 2,
            table_min_rows: 2,
            downsave: DownsaveMode::default(),
            soffice_timeout_secs: 60,
            title: None,
            page_headers: false,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
///
/// Out-of-range values are clamped rather than rejected, so `build()` is
/// infallible.
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes.max(1);
        self
    }

    pub fn sniff_magic(mut self, v: bool) -> Self {
        self.config.sniff_magic = v;
        self
    }

    pub fn table_min_columns(mut self, n: usize) -> Self {
        self.config.table_min_columns = n.max(2);
        self
    }

    pub fn table_min_rows(mut self, n: usize) -> Self {
        self.config.table_min_rows = n.max(1);
        self
    }

    pub fn downsave(mut self, mode: DownsaveMode) -> Self {
        self.config.downsave = mode;
        self
    }

    pub fn soffice_timeout_secs(mut self, secs: u64) -> Self {
        self.config.soffice_timeout_secs = secs.max(1);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn page_headers(mut self, v: bool) -> Self {
        self.config.page_headers = v;
        self
    }

    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

/// Behaviour of the legacy Word (97-2003) down-save step.
///
/// `docx-rs` can only assemble the modern XML-based container, so producing
/// a true binary `.doc` requires handing the bytes to a headless
/// LibreOffice. The modes cover the three deployments that exist in
/// practice: converter installed, converter absent, converter unwanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownsaveMode {
    /// Down-save when a converter binary is on PATH; otherwise emit the
    /// modern container bytes under the `.doc` name with a warning. (default)
    #[default]
    Auto,
    /// Fail the conversion with `WriteFailed` when no converter is available.
    Require,
    /// Never invoke the converter; always emit the modern container bytes.
    Skip,
}
