use crate::render::PixelField;
use crate::settings::GlyphThresholds;

/// Diagnostic glyph for one pixel, ordered from darkest to brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Glyph {
    Off,
    Dim,
    Body,
    Bright,
}

impl Glyph {
    pub fn classify(brightness: u8, thresholds: &GlyphThresholds) -> Self {
        if brightness > thresholds.bright {
            Glyph::Bright
        } else if brightness > thresholds.body {
            Glyph::Body
        } else if brightness > thresholds.dim {
            Glyph::Dim
        } else {
            Glyph::Off
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Glyph::Off => ' ',
            Glyph::Dim => '_',
            Glyph::Body => '=',
            Glyph::Bright => '~',
        }
    }
}

/// One character per pixel, using each pixel's peak channel as brightness.
pub fn format_glyphs(field: &PixelField, thresholds: &GlyphThresholds) -> String {
    field
        .as_slice()
        .iter()
        .map(|px| Glyph::classify(px.brightness(), thresholds).as_char())
        .collect()
}
