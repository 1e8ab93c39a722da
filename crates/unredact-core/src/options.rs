//! Options controlling removal policy and resource limits.

/// Default minimum width for a rectangle to count as a mask in conservative mode.
pub const DEFAULT_MIN_WIDTH: f64 = 5.0;
/// Default minimum height for a rectangle to count as a mask in conservative mode.
pub const DEFAULT_MIN_HEIGHT: f64 = 5.0;

/// Options controlling how aggressively redaction artifacts are removed.
///
/// The defaults describe conservative mode: black rectangles are only removed
/// when at least one of them is at least `min_width` x `min_height`, which
/// spares thin underline-style rules. [`UnredactOptions::aggressive`] is what
/// the command line and upload endpoint use.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnredactOptions {
    /// Remove every opaque black candidate regardless of size, and remove
    /// black-box annotations in addition to `/Redact` markers (default: false).
    pub aggressive: bool,
    /// Minimum rectangle width for conservative removal (default: 5.0).
    pub min_width: f64,
    /// Minimum rectangle height for conservative removal (default: 5.0).
    pub min_height: f64,
    /// Maximum input document size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Flate-compress rewritten content streams (default: true).
    pub compress_streams: bool,
}

impl Default for UnredactOptions {
    fn default() -> Self {
        Self {
            aggressive: false,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_input_bytes: None,
            compress_streams: true,
        }
    }
}

impl UnredactOptions {
    /// Options with aggressive removal enabled.
    pub fn aggressive() -> Self {
        Self {
            aggressive: true,
            ..Self::default()
        }
    }

    /// Set the conservative-mode size thresholds (builder pattern).
    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the maximum accepted input size (builder pattern).
    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = Some(max_input_bytes);
        self
    }
}
