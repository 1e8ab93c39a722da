//! Content stream operations as seen by the detection engine.
//!
//! A backend decodes a page's content stream into its own representation and
//! hands the engine a parallel sequence of [`Operation`]s. Only the operator
//! tag and the numeric shape of the operands matter here, so operands that
//! are not numbers collapse into [`Operand::Name`] or [`Operand::Other`].

use crate::error::NumericError;

/// A content stream operand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Integer number (e.g., `42`, `-7`).
    Integer(i64),
    /// Real (floating-point) number (e.g., `3.14`, `.5`).
    Real(f64),
    /// Name object (e.g., `/P0`). Stored without the leading `/`.
    Name(String),
    /// Anything else: strings, arrays, dictionaries, booleans, null.
    Other,
}

impl Operand {
    /// Read this operand as a number.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError`] for names and every non-numeric operand.
    pub fn as_f64(&self) -> Result<f64, NumericError> {
        match self {
            Operand::Integer(i) => Ok(*i as f64),
            Operand::Real(f) => Ok(*f),
            Operand::Name(name) => Err(NumericError::new(format!("name /{name}"))),
            Operand::Other => Err(NumericError::new("non-numeric operand")),
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Integer(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Real(value)
    }
}

/// Read every operand as a number, failing on the first non-numeric one.
pub fn operands_to_f64(operands: &[Operand]) -> Result<Vec<f64>, NumericError> {
    operands.iter().map(Operand::as_f64).collect()
}

/// Operator categories the engine distinguishes.
///
/// Every operator the scanner does not care about maps to
/// [`OperatorKind::Other`], which leaves both the fill color and the path in
/// progress untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// `q`: push the graphics state.
    SaveState,
    /// `Q`: pop the graphics state.
    RestoreState,
    /// `g`: set the non-stroking color to DeviceGray.
    SetFillGray,
    /// `rg`: set the non-stroking color to DeviceRGB.
    SetFillRgb,
    /// `k`: set the non-stroking color to DeviceCMYK.
    SetFillCmyk,
    /// `cs`: select the non-stroking color space.
    SetFillColorSpace,
    /// `sc`/`scn`: set the non-stroking color in the current color space.
    SetFillColor,
    /// `re`: append a rectangle sub-path.
    Rectangle,
    /// `m`, `l`, `c`, `v`, `y`, `h`: any other path construction.
    PathSegment,
    /// `f`, `F`, `f*`, `B`, `B*`, `b`, `b*`: paint with a fill.
    Fill,
    /// `n`, `W`, `W*`, `S`, `s`: end the path without filling it.
    EndPath,
    /// Anything else.
    Other,
}

impl OperatorKind {
    /// Classify a content stream operator tag.
    pub fn classify(operator: &str) -> Self {
        match operator {
            "q" => Self::SaveState,
            "Q" => Self::RestoreState,
            "g" => Self::SetFillGray,
            "rg" => Self::SetFillRgb,
            "k" => Self::SetFillCmyk,
            "cs" => Self::SetFillColorSpace,
            "sc" | "scn" => Self::SetFillColor,
            "re" => Self::Rectangle,
            "m" | "l" | "c" | "v" | "y" | "h" => Self::PathSegment,
            "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => Self::Fill,
            "n" | "W" | "W*" | "S" | "s" => Self::EndPath,
            _ => Self::Other,
        }
    }
}

/// A content stream operator with its operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Operator tag (e.g., `"re"`, `"f*"`, `"rg"`).
    pub operator: String,
    /// Operands that preceded the operator.
    pub operands: Vec<Operand>,
}

impl Operation {
    /// Create an operation from an operator tag and operands.
    pub fn new(operator: impl Into<String>, operands: Vec<Operand>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// The category of this operation's operator.
    pub fn kind(&self) -> OperatorKind {
        OperatorKind::classify(&self.operator)
    }
}
