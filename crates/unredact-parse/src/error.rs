//! Error types for the document backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`UnredactError`].

use thiserror::Error;
use unredact_core::UnredactError;

/// Error type for document backend operations.
///
/// Wraps backend-specific errors and provides conversion to [`UnredactError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution, content
    /// stream decoding).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] UnredactError),
}

impl From<BackendError> for UnredactError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => UnredactError::ParseError(msg),
            BackendError::Io(e) => UnredactError::IoError(e.to_string()),
            BackendError::Core(e) => e,
        }
    }
}
