// ============================================================================
// TEXT MEASUREMENT
// ============================================================================

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::error::LayoutError;

/// Rendered width of a string at a font size, in canvas units.
///
/// Implementations must be deterministic for a fixed text, font size and
/// font, otherwise layouts stop being reproducible.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> f64,
{
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        self(text, font_size)
    }
}

/// Measures text with a TrueType/OpenType font.
pub struct FontMeasure {
    font: Font<'static>,
}

impl FontMeasure {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, LayoutError> {
        Font::try_from_vec(data)
            .map(|font| Self { font })
            .ok_or_else(|| LayoutError::InvariantViolation("font data could not be loaded".into()))
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        let scale = Scale::uniform(font_size as f32);
        let glyphs: Vec<PositionedGlyph> = self.font.layout(text, scale, point(0.0, 0.0)).collect();
        let (min_x, max_x) = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
                (min_x.min(bb.min.x), max_x.max(bb.max.x))
            });
        if min_x < max_x {
            f64::from(max_x - min_x)
        } else {
            0.0
        }
    }
}

/// Font-free approximation: every character advances `ratio * font_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.ratio
    }
}
