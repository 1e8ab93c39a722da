//! Whole-document entry points.

use unredact_core::{UnredactError, UnredactOptions, UnredactReport};
use unredact_parse::{DocumentBackend, LopdfBackend};

use crate::processor::PageProcessor;

/// A rewritten document and what was removed from it.
#[derive(Debug, Clone)]
pub struct Unredacted {
    /// The serialized output document.
    pub bytes: Vec<u8>,
    /// Per-page and total removal counts.
    pub report: UnredactReport,
}

/// Removes redaction overlays from whole documents.
///
/// # Example
///
/// ```ignore
/// use unredact::{UnredactOptions, Unredactor};
///
/// let unredactor = Unredactor::new(UnredactOptions::aggressive());
/// let result = unredactor.unredact_bytes(&pdf_bytes)?;
/// println!("{}", result.report.summary("out.pdf"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unredactor {
    processor: PageProcessor,
}

impl Unredactor {
    /// Create an unredactor with the given options.
    pub fn new(options: UnredactOptions) -> Self {
        Self {
            processor: PageProcessor::new(options),
        }
    }

    /// The options this unredactor applies.
    pub fn options(&self) -> &UnredactOptions {
        self.processor.options()
    }

    /// Process a PDF held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`UnredactError::ResourceLimitExceeded`] if the input is larger
    /// than `max_input_bytes`, [`UnredactError::EncryptedDocument`] for
    /// encrypted input, and [`UnredactError::ParseError`] if the document or
    /// one of its content streams cannot be decoded.
    pub fn unredact_bytes(&self, bytes: &[u8]) -> Result<Unredacted, UnredactError> {
        if let Some(max_bytes) = self.options().max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(UnredactError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }

        let mut doc = LopdfBackend::open(bytes).map_err(UnredactError::from)?;
        let report = self
            .processor
            .process_document::<LopdfBackend>(&mut doc)
            .map_err(UnredactError::from)?;
        let bytes = LopdfBackend::save(&mut doc).map_err(UnredactError::from)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            pages = report.page_count(),
            annotations_removed = report.totals.annotations_removed,
            path_ops_removed = report.totals.path_ops_removed,
            "unredacted document"
        );

        Ok(Unredacted { bytes, report })
    }

    /// Read `input`, process it and write the result to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`UnredactError::IoError`] if either file cannot be accessed,
    /// plus every error of [`Unredactor::unredact_bytes`]. Nothing is written
    /// when processing fails.
    #[cfg(feature = "std")]
    pub fn unredact_file(
        &self,
        input: impl AsRef<std::path::Path>,
        output: impl AsRef<std::path::Path>,
    ) -> Result<UnredactReport, UnredactError> {
        let bytes = std::fs::read(input.as_ref())?;
        let result = self.unredact_bytes(&bytes)?;
        std::fs::write(output.as_ref(), &result.bytes)?;
        Ok(result.report)
    }
}

/// Process a PDF held in memory with the given options.
///
/// Shorthand for `Unredactor::new(options.clone()).unredact_bytes(bytes)`.
///
/// # Errors
///
/// See [`Unredactor::unredact_bytes`].
pub fn unredact_bytes(bytes: &[u8], options: &UnredactOptions) -> Result<Unredacted, UnredactError> {
    Unredactor::new(options.clone()).unredact_bytes(bytes)
}
