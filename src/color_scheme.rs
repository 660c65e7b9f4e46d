//! Trace colour palette.
//!
//! Colours are allocated by trace (or category) index and wrap around the
//! palette, so the same index always maps to the same colour.

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The fixed palette used for datasets and pie slices.
pub const PALETTE: [Rgb; 9] = [
    Rgb(75, 192, 192),  // light blue
    Rgb(240, 139, 75),  // orange
    Rgb(75, 192, 75),   // green
    Rgb(192, 75, 75),   // red
    Rgb(75, 75, 192),   // blue
    Rgb(192, 192, 192), // light gray
    Rgb(192, 75, 192),  // pink
    Rgb(192, 192, 75),  // yellow
    Rgb(75, 75, 75),    // dark gray
];

/// Opacity of border strokes.
pub const BORDER_ALPHA: f32 = 1.0;
/// Opacity of filled areas.
pub const BACKGROUND_ALPHA: f32 = 0.2;

/// Palette colour for the given index.
#[inline]
pub fn color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

impl Rgb {
    /// CSS `rgba(...)` string with the given alpha.
    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }

    /// CSS string for a border stroke.
    pub fn border(&self) -> String {
        self.rgba(BORDER_ALPHA)
    }

    /// CSS string for a translucent fill.
    pub fn background(&self) -> String {
        self.rgba(BACKGROUND_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_with_period_nine() {
        for i in 0..50 {
            assert_eq!(color(i), color(i + 9));
        }
        assert_eq!(color(0), Rgb(75, 192, 192));
        assert_eq!(color(8), Rgb(75, 75, 75));
    }

    #[test]
    fn rgba_strings_match_chartjs_format() {
        let c = color(1);
        assert_eq!(c.border(), "rgba(240, 139, 75, 1)");
        assert_eq!(c.background(), "rgba(240, 139, 75, 0.2)");
    }
}
