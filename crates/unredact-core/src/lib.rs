//! unredact-core: Backend-independent data types and detection algorithms.
//!
//! This crate provides the types (Operation, Color, Annotation, etc.) and the
//! decision logic used by unredact-rs to find cosmetic redaction artifacts:
//! `/Redact` annotations, opaque black box annotations and black rectangles
//! filled over page content. It does not depend on any PDF library.

pub mod annotation;
pub mod error;
pub mod fill_paths;
pub mod fill_state;
pub mod operation;
pub mod options;
pub mod painting;
pub mod path;
pub mod report;

pub use annotation::{Annotation, AnnotationSubtype, MIN_BOX_OPACITY};
pub use error::{NumericError, UnredactError};
pub use fill_paths::{find_black_fill_paths, retain_unmarked};
pub use fill_state::FillState;
pub use operation::{Operand, Operation, OperatorKind, operands_to_f64};
pub use options::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, UnredactOptions};
pub use painting::{BLACK_TOLERANCE, Color, ColorSpace};
pub use path::PathRecord;
pub use report::{PageReport, RemovalTotals, UnredactReport};
