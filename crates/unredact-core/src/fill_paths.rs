//! Detection of black rectangles painted over page content.
//!
//! [`find_black_fill_paths`] runs a single left-to-right pass over one page's
//! operations, driving a [`FillState`] and a [`PathRecord`], and returns the
//! indices of every operator that belongs to a removable black mask: the
//! path construction operators plus the fill operator that painted them.

use std::collections::BTreeSet;

use crate::fill_state::FillState;
use crate::operation::{Operation, OperatorKind};
use crate::options::UnredactOptions;
use crate::path::PathRecord;

/// Find the operator indices of black-filled rectangle masks.
///
/// Operators other than fill color, path construction, painting and `q`/`Q`
/// pass through untouched. Color and path state never leak across calls.
pub fn find_black_fill_paths(ops: &[Operation], options: &UnredactOptions) -> BTreeSet<usize> {
    let mut state = FillState::new();
    let mut path = PathRecord::new();
    let mut marked = BTreeSet::new();

    for (index, op) in ops.iter().enumerate() {
        match op.kind() {
            OperatorKind::SaveState => state.save(),
            OperatorKind::RestoreState => state.restore(),
            OperatorKind::SetFillGray => state.apply_gray(&op.operands),
            OperatorKind::SetFillRgb => state.apply_rgb(&op.operands),
            OperatorKind::SetFillCmyk => state.apply_cmyk(&op.operands),
            OperatorKind::SetFillColorSpace => state.apply_color_space(&op.operands),
            OperatorKind::SetFillColor => state.apply_components(&op.operands),
            OperatorKind::Rectangle => path.push_rect(index, &op.operands),
            OperatorKind::PathSegment => path.push_segment(index),
            OperatorKind::Fill => {
                if path.is_black_mask(state.fill_color(), options) {
                    marked.extend(path.indices().iter().copied());
                    marked.insert(index);
                }
                path.reset();
            }
            OperatorKind::EndPath => path.reset(),
            OperatorKind::Other => {}
        }
    }

    marked
}

/// Drop every element whose index is in `marked`, preserving order.
///
/// Generic so a backend can filter its own operation type with indices
/// computed over the parallel [`Operation`] view.
pub fn retain_unmarked<T>(items: Vec<T>, marked: &BTreeSet<usize>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !marked.contains(index))
        .map(|(_, item)| item)
        .collect()
}
