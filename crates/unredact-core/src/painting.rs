//! Fill colors as tracked through a content stream.

/// Per-channel tolerance used when deciding that a content-stream fill color
/// is black. Channels derived from scaled or transformed values carry
/// rounding noise, so a component at or below this value counts as zero.
pub const BLACK_TOLERANCE: f64 = 0.02;

/// A non-stroking color set by a content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// DeviceGray, set by `g`. Equivalent to `Rgb(v, v, v)`.
    Gray(f64),
    /// DeviceRGB, set by `rg`.
    Rgb(f64, f64, f64),
    /// DeviceCMYK, set by `k`.
    Cmyk(f64, f64, f64, f64),
    /// A color in a space the engine does not model (Separation, ICCBased,
    /// patterns, named resources), or operands that did not parse.
    Unknown,
}

/// The non-stroking color space selected by `cs`, `g`, `rg` or `k`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColorSpace {
    #[default]
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    /// Any other family or a named resource such as `/CS0`.
    Other(String),
}

impl ColorSpace {
    /// Map a `cs` operand to a color space. Only the device families are
    /// recognised by name; resource names are not resolved.
    pub fn from_name(name: &str) -> Self {
        match name {
            "DeviceGray" | "G" => ColorSpace::DeviceGray,
            "DeviceRGB" | "RGB" => ColorSpace::DeviceRgb,
            "DeviceCMYK" | "CMYK" => ColorSpace::DeviceCmyk,
            other => ColorSpace::Other(other.to_string()),
        }
    }

    /// The color `cs` installs when selecting this space.
    pub fn initial_color(&self) -> Color {
        match self {
            ColorSpace::DeviceGray => Color::Gray(0.0),
            ColorSpace::DeviceRgb => Color::Rgb(0.0, 0.0, 0.0),
            ColorSpace::DeviceCmyk => Color::Cmyk(0.0, 0.0, 0.0, 1.0),
            ColorSpace::Other(_) => Color::Unknown,
        }
    }

    /// Interpret `sc`/`scn` components in this space.
    ///
    /// A component count that does not match the space gives
    /// [`Color::Unknown`].
    pub fn color_from_components(&self, components: &[f64]) -> Color {
        match (self, components) {
            (ColorSpace::DeviceGray, [g]) => Color::Gray(*g),
            (ColorSpace::DeviceRgb, [r, g, b]) => Color::Rgb(*r, *g, *b),
            (ColorSpace::DeviceCmyk, [c, m, y, k]) => Color::Cmyk(*c, *m, *y, *k),
            _ => Color::Unknown,
        }
    }
}

impl Color {
    /// The initial fill color of every content stream.
    pub fn black() -> Self {
        Color::Rgb(0.0, 0.0, 0.0)
    }

    /// Returns true if the color renders as black within `tolerance` per channel.
    ///
    /// For CMYK that means no cyan, magenta or yellow and full black ink.
    /// Unknown colors are never black.
    pub fn is_black_within(&self, tolerance: f64) -> bool {
        match self {
            Color::Gray(g) => *g <= tolerance,
            Color::Rgb(r, g, b) => [r, g, b].iter().all(|c| **c <= tolerance),
            Color::Cmyk(c, m, y, k) => {
                [c, m, y].iter().all(|v| **v <= tolerance) && *k >= 1.0 - tolerance
            }
            Color::Unknown => false,
        }
    }

    /// Returns true if the color is black within [`BLACK_TOLERANCE`].
    pub fn is_black(&self) -> bool {
        self.is_black_within(BLACK_TOLERANCE)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
