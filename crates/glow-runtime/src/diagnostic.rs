use std::fmt;

use glow_core::TiltSample;

/// Human-readable status for one render tick: mode, tilt, position and the
/// glyph strip.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticLine {
    pub glyphs: String,
    pub sample: TiltSample,
    pub position: f32,
}

impl DiagnosticLine {
    pub fn new(glyphs: String, sample: TiltSample, position: f32) -> Self {
        Self { glyphs, sample, position }
    }
}

impl fmt::Display for DiagnosticLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Tilt (X): {:.2} | Pos: {:.2} | Flow: [{}] ",
            self.sample.mode_tag(),
            self.sample.value,
            self.position,
            self.glyphs
        )
    }
}
