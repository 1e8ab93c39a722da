//! Error types for unredact-rs.
//!
//! Provides [`UnredactError`] for fatal errors that stop processing of a
//! document, and [`NumericError`] for the local, recoverable failure of
//! reading an operand or dictionary value as a number.

use std::fmt;

/// Fatal error types for document processing.
///
/// These errors indicate conditions that prevent the document from being
/// opened, rewritten or serialized. Malformed values inside an otherwise
/// readable document never surface here; they are absorbed by the detection
/// logic as "not a removal candidate".
#[derive(Debug, Clone, PartialEq)]
pub enum UnredactError {
    /// Error parsing the document structure or a content stream.
    ParseError(String),
    /// I/O error reading or writing document data.
    IoError(String),
    /// The document is encrypted; encrypted documents are not processed.
    EncryptedDocument,
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for UnredactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnredactError::ParseError(msg) => write!(f, "parse error: {msg}"),
            UnredactError::IoError(msg) => write!(f, "I/O error: {msg}"),
            UnredactError::EncryptedDocument => {
                write!(f, "document is encrypted and cannot be processed")
            }
            UnredactError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            UnredactError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for UnredactError {}

impl From<std::io::Error> for UnredactError {
    fn from(err: std::io::Error) -> Self {
        UnredactError::IoError(err.to_string())
    }
}

/// A value could not be read as a number.
///
/// Carries a short description of what was found instead. Callers in the
/// detection path never propagate this; they treat it as "not a candidate".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericError {
    found: String,
}

impl NumericError {
    /// Create an error describing the non-numeric value that was found.
    pub fn new(found: impl Into<String>) -> Self {
        Self {
            found: found.into(),
        }
    }

    /// Description of the offending value.
    pub fn found(&self) -> &str {
        &self.found
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected number, got {}", self.found)
    }
}

impl std::error::Error for NumericError {}
