//! The path under construction between a path-start and a paint operator.

use crate::operation::{Operand, operands_to_f64};
use crate::options::UnredactOptions;
use crate::painting::Color;

/// Operator indices and rectangle geometry of the path in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathRecord {
    /// Indices (into the page's operation list) of every construction operator.
    indices: Vec<usize>,
    /// `(width, height)` of each well-formed `re` sub-path.
    rects: Vec<(f64, f64)>,
    /// Set once any line, curve, move, close or malformed `re` joins the path.
    has_non_rect: bool,
}

impl PathRecord {
    /// Create an empty path record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no construction operator has been recorded.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Operator indices recorded for this path.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Rectangle sizes recorded for this path.
    pub fn rects(&self) -> &[(f64, f64)] {
        &self.rects
    }

    /// Returns true if the path contains anything other than rectangles.
    pub fn has_non_rect(&self) -> bool {
        self.has_non_rect
    }

    /// Record an `re` operator at `index`.
    ///
    /// Only `x y width height` with four numeric operands counts as a
    /// rectangle; anything else taints the path as non-rectangular.
    pub fn push_rect(&mut self, index: usize, operands: &[Operand]) {
        self.indices.push(index);
        match operands_to_f64(operands).as_deref() {
            Ok([_x, _y, width, height]) => self.rects.push((*width, *height)),
            _ => self.has_non_rect = true,
        }
    }

    /// Record a line, curve, move or close operator at `index`.
    pub fn push_segment(&mut self, index: usize) {
        self.indices.push(index);
        self.has_non_rect = true;
    }

    /// Discard the path.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.rects.clear();
        self.has_non_rect = false;
    }

    /// Decide whether filling this path with `fill` paints a removable mask.
    ///
    /// Only pure-rectangle paths filled with black qualify. Aggressive mode
    /// removes every such path; conservative mode requires at least one
    /// rectangle whose signed width and height reach `min_width` and
    /// `min_height`. A rectangle drawn with a negative extent never does.
    pub fn is_black_mask(&self, fill: &Color, options: &UnredactOptions) -> bool {
        if self.is_empty() || self.has_non_rect || !fill.is_black() {
            return false;
        }
        if options.aggressive {
            return true;
        }
        self.rects
            .iter()
            .any(|(w, h)| *w >= options.min_width && *h >= options.min_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_operands(x: f64, y: f64, w: f64, h: f64) -> Vec<Operand> {
        vec![
            Operand::Real(x),
            Operand::Real(y),
            Operand::Real(w),
            Operand::Real(h),
        ]
    }

    fn conservative() -> UnredactOptions {
        UnredactOptions::default()
    }

    #[test]
    fn new_is_empty() {
        let path = PathRecord::new();
        assert!(path.is_empty());
        assert!(path.rects().is_empty());
        assert!(!path.has_non_rect());
    }

    #[test]
    fn push_rect_records_size() {
        let mut path = PathRecord::new();
        path.push_rect(3, &rect_operands(10.0, 10.0, 100.0, 50.0));
        assert_eq!(path.indices(), &[3]);
        assert_eq!(path.rects(), &[(100.0, 50.0)]);
        assert!(!path.has_non_rect());
    }

    #[test]
    fn malformed_rect_taints_path() {
        let mut path = PathRecord::new();
        path.push_rect(0, &[Operand::Integer(1), Operand::Integer(2)]);
        assert!(path.has_non_rect());
        assert_eq!(path.indices(), &[0]);

        let mut path = PathRecord::new();
        path.push_rect(0, &[Operand::Integer(1), Operand::Integer(2), Operand::Other, Operand::Integer(4)]);
        assert!(path.has_non_rect());
        assert!(path.rects().is_empty());
    }

    #[test]
    fn segment_taints_path() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 10.0, 10.0));
        path.push_segment(1);
        assert!(path.has_non_rect());
        assert_eq!(path.indices(), &[0, 1]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 10.0, 10.0));
        path.push_segment(1);
        path.reset();
        assert_eq!(path, PathRecord::new());
    }

    #[test]
    fn empty_path_is_never_a_mask() {
        let path = PathRecord::new();
        assert!(!path.is_black_mask(&Color::black(), &UnredactOptions::aggressive()));
    }

    #[test]
    fn non_rect_is_never_a_mask() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 100.0, 100.0));
        path.push_segment(1);
        assert!(!path.is_black_mask(&Color::black(), &UnredactOptions::aggressive()));
        assert!(!path.is_black_mask(&Color::black(), &conservative()));
    }

    #[test]
    fn non_black_fill_is_never_a_mask() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 100.0, 100.0));
        assert!(!path.is_black_mask(&Color::Rgb(1.0, 0.0, 0.0), &UnredactOptions::aggressive()));
        assert!(!path.is_black_mask(&Color::Unknown, &UnredactOptions::aggressive()));
    }

    #[test]
    fn aggressive_ignores_size() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(1.0, 1.0, 2.0, 2.0));
        assert!(path.is_black_mask(&Color::black(), &UnredactOptions::aggressive()));
    }

    #[test]
    fn conservative_requires_min_size() {
        let mut small = PathRecord::new();
        small.push_rect(0, &rect_operands(1.0, 1.0, 2.0, 2.0));
        assert!(!small.is_black_mask(&Color::black(), &conservative()));

        let mut large = PathRecord::new();
        large.push_rect(0, &rect_operands(10.0, 10.0, 100.0, 50.0));
        assert!(large.is_black_mask(&Color::black(), &conservative()));
    }

    #[test]
    fn conservative_thin_rule_is_kept() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(72.0, 100.0, 400.0, 0.5));
        assert!(!path.is_black_mask(&Color::black(), &conservative()));
    }

    #[test]
    fn conservative_needs_both_dimensions_on_one_rect() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 100.0, 1.0));
        path.push_rect(1, &rect_operands(0.0, 0.0, 1.0, 100.0));
        assert!(!path.is_black_mask(&Color::black(), &conservative()));

        path.push_rect(2, &rect_operands(0.0, 0.0, 5.0, 5.0));
        assert!(path.is_black_mask(&Color::black(), &conservative()));
    }

    #[test]
    fn conservative_keeps_negative_extents() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(100.0, 700.0, 200.0, -20.0));
        assert!(!path.is_black_mask(&Color::black(), &conservative()));
        assert!(path.is_black_mask(&Color::black(), &UnredactOptions::aggressive()));
    }

    #[test]
    fn custom_thresholds() {
        let mut path = PathRecord::new();
        path.push_rect(0, &rect_operands(0.0, 0.0, 8.0, 8.0));
        let opts = UnredactOptions::default().with_min_size(10.0, 10.0);
        assert!(!path.is_black_mask(&Color::black(), &opts));
    }
}
