//! unredact-parse: PDF document backend.
//!
//! This crate opens, edits and serializes PDF documents on behalf of the
//! detection logic in unredact-core. The [`DocumentBackend`] trait is the
//! seam; [`LopdfBackend`] is the implementation built on lopdf.

pub mod backend;
pub mod error;
mod inline_image;
pub mod lopdf_backend;

pub use backend::DocumentBackend;
pub use error::BackendError;
pub use lopdf_backend::{ContentPart, LopdfBackend, LopdfDocument, LopdfPage, PageContent};
pub use unredact_core;
