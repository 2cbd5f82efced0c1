use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel color sample, one per LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `scale / 256`, keeping full scale lossless.
    ///
    /// Matches the "fixed" `scale8` used by common LED strip libraries:
    /// `c * (1 + scale) >> 8`, so a scale of 255 returns the channel unchanged
    /// and 0 turns it off.
    pub fn scale8(self, scale: u8) -> Self {
        let s = scale as u16 + 1;
        Self {
            r: ((self.r as u16 * s) >> 8) as u8,
            g: ((self.g as u16 * s) >> 8) as u8,
            b: ((self.b as u16 * s) >> 8) as u8,
        }
    }

    /// Scale by a unit intensity in [0, 1]. Out-of-range input saturates.
    pub fn scale_unit(self, intensity: f32) -> Self {
        // float -> u8 casts saturate, NaN maps to 0
        self.scale8((intensity * 255.0) as u8)
    }

    /// Peak channel magnitude, used as perceived brightness.
    pub fn brightness(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}
