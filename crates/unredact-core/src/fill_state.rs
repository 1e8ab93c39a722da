//! Fill color stack for the content stream scan.
//!
//! Models the one slice of the PDF graphics state the engine needs: the
//! non-stroking color and color space, saved by `q` and restored by `Q`.
//! Stroking color is never tracked because only filled paths are removal
//! candidates.

use crate::operation::{Operand, operands_to_f64};
use crate::painting::{Color, ColorSpace};

/// Current fill color and space plus those saved by enclosing `q` operators.
///
/// One value lives for exactly one pass over one page's operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillState {
    /// Current non-stroking color.
    fill_color: Color,
    /// Current non-stroking color space.
    color_space: ColorSpace,
    /// Saved state for q/Q.
    stack: Vec<(Color, ColorSpace)>,
}

impl FillState {
    /// Create a state with black fill and an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current fill color.
    pub fn fill_color(&self) -> &Color {
        &self.fill_color
    }

    /// Get the current fill color space.
    pub fn color_space(&self) -> &ColorSpace {
        &self.color_space
    }

    // --- q/Q operators ---

    /// `q` operator: save the current fill color and space.
    pub fn save(&mut self) {
        self.stack
            .push((self.fill_color.clone(), self.color_space.clone()));
    }

    /// `Q` operator: restore the most recently saved fill color and space.
    ///
    /// An unbalanced `Q` resets to the initial black DeviceGray fill instead
    /// of failing.
    pub fn restore(&mut self) {
        let (color, space) = self.stack.pop().unwrap_or_default();
        self.fill_color = color;
        self.color_space = space;
    }

    // --- Color operators ---

    /// `g` operator: set the fill color to DeviceGray.
    pub fn set_gray(&mut self, gray: f64) {
        self.color_space = ColorSpace::DeviceGray;
        self.fill_color = Color::Gray(gray);
    }

    /// `rg` operator: set the fill color to DeviceRGB.
    pub fn set_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.color_space = ColorSpace::DeviceRgb;
        self.fill_color = Color::Rgb(r, g, b);
    }

    /// `k` operator: set the fill color to DeviceCMYK.
    pub fn set_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
        self.color_space = ColorSpace::DeviceCmyk;
        self.fill_color = Color::Cmyk(c, m, y, k);
    }

    /// `cs` operator: select a color space and its initial color.
    pub fn set_color_space(&mut self, space: ColorSpace) {
        self.fill_color = space.initial_color();
        self.color_space = space;
    }

    /// `sc`/`scn` operator: set the fill color from components in the
    /// current color space.
    pub fn set_components(&mut self, components: &[f64]) {
        self.fill_color = self.color_space.color_from_components(components);
    }

    /// Mark the fill color as unknown.
    ///
    /// Used when a color operator's operands do not parse, so whatever the
    /// stream paints next is not mistaken for black.
    pub fn set_unknown(&mut self) {
        self.fill_color = Color::Unknown;
    }

    // --- Operand-driven entry points ---

    /// Apply `g` from raw operands.
    pub fn apply_gray(&mut self, operands: &[Operand]) {
        match operands_to_f64(operands).as_deref() {
            Ok([gray]) => self.set_gray(*gray),
            _ => self.set_unknown(),
        }
    }

    /// Apply `rg` from raw operands.
    pub fn apply_rgb(&mut self, operands: &[Operand]) {
        match operands_to_f64(operands).as_deref() {
            Ok([r, g, b]) => self.set_rgb(*r, *g, *b),
            _ => self.set_unknown(),
        }
    }

    /// Apply `k` from raw operands.
    pub fn apply_cmyk(&mut self, operands: &[Operand]) {
        match operands_to_f64(operands).as_deref() {
            Ok([c, m, y, k]) => self.set_cmyk(*c, *m, *y, *k),
            _ => self.set_unknown(),
        }
    }

    /// Apply `cs` from raw operands. A missing or non-name operand selects an
    /// unmodelled space.
    pub fn apply_color_space(&mut self, operands: &[Operand]) {
        let space = match operands {
            [Operand::Name(name)] => ColorSpace::from_name(name),
            _ => ColorSpace::Other(String::new()),
        };
        self.set_color_space(space);
    }

    /// Apply `sc`/`scn` from raw operands.
    ///
    /// A trailing pattern name (`/P0 scn`) yields an unknown color.
    pub fn apply_components(&mut self, operands: &[Operand]) {
        match operands_to_f64(operands) {
            Ok(components) => self.set_components(&components),
            Err(_) => self.set_unknown(),
        }
    }
}
