//! Startup failures, and request failures with their HTTP responses.

use std::io;
use std::net::SocketAddr;
use std::num::ParseIntError;

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use unredact::UnredactError;

/// Why the server could not start or stopped serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("server error: {0}")]
    Serve(io::Error),
}

/// Why an upload request failed.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No `pdf` file field, or one without a file name.
    #[error("Missing PDF upload")]
    MissingUpload,
    /// The `pdf` field carried no data.
    #[error("Uploaded file is empty")]
    EmptyUpload,
    /// The multipart body could not be read.
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    /// The document could not be processed.
    #[error("failed to process PDF: {0}")]
    Unredact(#[from] UnredactError),
    /// The processing task panicked or was cancelled.
    #[error("processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// Status code returned to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingUpload | ServerError::EmptyUpload => StatusCode::BAD_REQUEST,
            ServerError::Multipart(err) => err.status(),
            ServerError::Unredact(UnredactError::ResourceLimitExceeded { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ServerError::Unredact(_) | ServerError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "upload failed");
        } else {
            tracing::debug!(error = %self, %status, "upload rejected");
        }
        (status, self.to_string()).into_response()
    }
}
