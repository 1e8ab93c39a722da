//! Annotation classification.
//!
//! Provides [`Annotation`] and [`AnnotationSubtype`] plus the predicates that
//! decide whether an annotation is a redaction overlay.

use crate::operation::{Operand, operands_to_f64};

/// Opacity at or above which a black annotation is treated as a solid box.
pub const MIN_BOX_OPACITY: f64 = 0.9;

/// Annotation subtypes the filter distinguishes.
///
/// Unknown or irrelevant subtypes are represented as [`AnnotationSubtype::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationSubtype {
    /// Redaction marker (`/Redact`).
    Redact,
    /// Square annotation (rectangle shape).
    Square,
    /// Polygon annotation.
    Polygon,
    /// Highlight markup annotation.
    Highlight,
    /// Ink annotation (freehand drawing).
    Ink,
    /// Stamp annotation.
    Stamp,
    /// Other / unknown annotation subtype.
    Other(String),
}

impl AnnotationSubtype {
    /// Parse an annotation subtype from a PDF /Subtype name.
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype {
            "Redact" => Self::Redact,
            "Square" => Self::Square,
            "Polygon" => Self::Polygon,
            "Highlight" => Self::Highlight,
            "Ink" => Self::Ink,
            "Stamp" => Self::Stamp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true for the shape and markup subtypes commonly drawn as
    /// solid boxes over text.
    pub fn can_draw_box(&self) -> bool {
        matches!(
            self,
            Self::Square | Self::Polygon | Self::Highlight | Self::Ink | Self::Stamp
        )
    }
}

/// The fields of a page annotation that bear on redaction removal.
///
/// Color entries are kept as raw operands so the predicates can treat a
/// non-numeric component as "not black" instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// The annotation subtype (parsed from /Subtype).
    pub subtype: AnnotationSubtype,
    /// Interior color (/IC entry).
    pub interior_color: Option<Vec<Operand>>,
    /// Border or markup color (/C entry).
    pub color: Option<Vec<Operand>>,
    /// Stroking opacity (/CA entry).
    pub stroke_opacity: Option<Operand>,
    /// Non-stroking opacity (/ca entry).
    pub fill_opacity: Option<Operand>,
}

impl Annotation {
    /// Create an annotation with the given subtype and no color or opacity.
    pub fn new(subtype: AnnotationSubtype) -> Self {
        Self {
            subtype,
            interior_color: None,
            color: None,
            stroke_opacity: None,
            fill_opacity: None,
        }
    }

    /// Set the interior color (builder pattern).
    pub fn with_interior_color(mut self, components: Vec<Operand>) -> Self {
        self.interior_color = Some(components);
        self
    }

    /// Set the /C color (builder pattern).
    pub fn with_color(mut self, components: Vec<Operand>) -> Self {
        self.color = Some(components);
        self
    }

    /// Set the /CA opacity (builder pattern).
    pub fn with_stroke_opacity(mut self, opacity: Operand) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    /// Set the /ca opacity (builder pattern).
    pub fn with_fill_opacity(mut self, opacity: Operand) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    /// The color the annotation is painted with: /IC, or /C when /IC is
    /// absent or empty.
    pub fn fill_color(&self) -> Option<&[Operand]> {
        match self.interior_color.as_deref() {
            Some(ic) if !ic.is_empty() => Some(ic),
            _ => self.color.as_deref(),
        }
    }

    /// The annotation's opacity operand: /CA, then /ca, or `None` when
    /// neither is present (meaning fully opaque).
    pub fn opacity(&self) -> Option<&Operand> {
        self.stroke_opacity.as_ref().or(self.fill_opacity.as_ref())
    }

    /// Returns true for explicit redaction markers.
    pub fn is_redaction_marker(&self) -> bool {
        self.subtype == AnnotationSubtype::Redact
    }

    /// Returns true if the annotation would render as an opaque black box.
    ///
    /// Requires a box-capable subtype, a non-empty fill color whose components
    /// are all exactly zero, and opacity of at least [`MIN_BOX_OPACITY`].
    /// Any component or opacity that is not a number means "no".
    pub fn looks_like_black_box(&self) -> bool {
        if !self.subtype.can_draw_box() {
            return false;
        }
        let black = match self.fill_color().map(operands_to_f64) {
            Some(Ok(components)) => {
                !components.is_empty() && components.iter().all(|c| *c == 0.0)
            }
            _ => false,
        };
        if !black {
            return false;
        }
        match self.opacity().map(Operand::as_f64) {
            None => true,
            Some(Ok(opacity)) => opacity >= MIN_BOX_OPACITY,
            Some(Err(_)) => false,
        }
    }

    /// Decide whether the annotation filter drops this annotation.
    ///
    /// Redaction markers are always dropped; black boxes only in aggressive mode.
    pub fn should_remove(&self, aggressive: bool) -> bool {
        self.is_redaction_marker() || (aggressive && self.looks_like_black_box())
    }
}
