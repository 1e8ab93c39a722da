//! unredact: Remove cosmetic redactions from PDF documents.
//!
//! This is the public API facade crate for unredact-rs. It re-exports types from
//! unredact-core and uses unredact-parse for reading and rewriting documents.
//!
//! Only overlays are removed: `/Redact` annotations, opaque black box
//! annotations and black rectangles filled over page content. Text that was
//! deleted from the document before it was saved cannot be recovered.
//!
//! # Architecture
//!
//! - **unredact-core**: Backend-independent data types and detection logic
//! - **unredact-parse**: Document backend (lopdf)
//! - **unredact** (this crate): Public API that ties everything together

mod output;
mod processor;
mod unredactor;

pub use output::{OUTPUT_SUFFIX, output_path_for, unredacted_file_name};
pub use processor::PageProcessor;
pub use unredactor::{Unredacted, Unredactor, unredact_bytes};

pub use unredact_core::{
    Annotation, AnnotationSubtype, Color, PageReport, RemovalTotals, UnredactError,
    UnredactOptions, UnredactReport,
};
pub use unredact_parse::{DocumentBackend, LopdfBackend};

pub use unredact_core;
pub use unredact_parse;
