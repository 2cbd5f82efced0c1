use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use glow_core::Rgb;

use crate::diagnostic::DiagnosticLine;
use crate::sink::{DiagnosticSink, PixelSink};

const BLOCK: char = '█';

/// Desktop stand-in for the LED strip: draws the pixels as 24-bit colored
/// blocks followed by the diagnostic line, overwriting one terminal line per
/// tick.
///
/// The global strip brightness is applied here, like a strip driver would at
/// transmit time; the diagnostic glyphs come from the unscaled field.
pub struct TerminalStrip<W> {
    out: W,
    brightness: u8,
    preview: Vec<Rgb>,
}

impl<W: Write> TerminalStrip<W> {
    pub fn new(out: W, brightness: u8) -> Self {
        Self {
            out,
            brightness,
            preview: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PixelSink for TerminalStrip<W> {
    fn push_pixels(&mut self, pixels: &[Rgb]) -> bool {
        let brightness = self.brightness;
        self.preview.clear();
        self.preview.extend(pixels.iter().map(|px| px.scale8(brightness)));
        true
    }
}

impl<W: Write> DiagnosticSink for TerminalStrip<W> {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()> {
        queue!(self.out, Print('\r'))?;
        for px in &self.preview {
            queue!(
                self.out,
                SetForegroundColor(Color::Rgb { r: px.r, g: px.g, b: px.b }),
                Print(BLOCK)
            )?;
        }
        queue!(self.out, ResetColor, Print(' '), Print(line))?;
        self.out.flush()
    }
}
