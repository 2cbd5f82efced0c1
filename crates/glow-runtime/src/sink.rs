use std::io::{self, Write};

use crossbeam::channel::Sender;
use glow_core::{PixelField, Rgb};

use crate::diagnostic::DiagnosticLine;

/// Receives the rendered strip once per tick.
pub trait PixelSink {
    /// Hand over exactly one color per LED. Returns `false` if the frame was
    /// dropped.
    fn push_pixels(&mut self, pixels: &[Rgb]) -> bool;
}

/// Receives the diagnostic line once per tick.
pub trait DiagnosticSink {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PixelSink for NullSink {
    fn push_pixels(&mut self, _pixels: &[Rgb]) -> bool {
        true
    }
}

impl DiagnosticSink for NullSink {
    fn write_line(&mut self, _line: &DiagnosticLine) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards pixel frames to another thread (e.g. a strip driver) without
/// blocking the render loop. Frames are dropped while the receiver lags.
pub struct ChannelPixelSink {
    tx: Sender<PixelField>,
}

impl ChannelPixelSink {
    pub fn new(tx: Sender<PixelField>) -> Self {
        Self { tx }
    }
}

impl PixelSink for ChannelPixelSink {
    fn push_pixels(&mut self, pixels: &[Rgb]) -> bool {
        self.tx.try_send(PixelField::new(pixels.to_vec())).is_ok()
    }
}

/// Writes each line after a carriage return and without a newline, so the
/// status overwrites itself in place on a terminal or serial console.
pub struct ConsoleDiagnostics<W> {
    out: W,
}

impl<W: Write> ConsoleDiagnostics<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for ConsoleDiagnostics<W> {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()> {
        write!(self.out, "\r{}", line)?;
        self.out.flush()
    }
}

/// Sends each line to the `log` facade at trace level. Used when stdout is
/// not a terminal, where carriage-return overwrites make no sense.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()> {
        log::trace!("{}", line);
        Ok(())
    }
}

/// Combines a pixel sink and a diagnostic sink into one value for the
/// render loop.
pub struct SinkPair<P, D> {
    pub pixels: P,
    pub diagnostics: D,
}

impl<P, D> SinkPair<P, D> {
    pub fn new(pixels: P, diagnostics: D) -> Self {
        Self { pixels, diagnostics }
    }
}

impl<P: PixelSink, D> PixelSink for SinkPair<P, D> {
    fn push_pixels(&mut self, pixels: &[Rgb]) -> bool {
        self.pixels.push_pixels(pixels)
    }
}

impl<P, D: DiagnosticSink> DiagnosticSink for SinkPair<P, D> {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()> {
        self.diagnostics.write_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::bounded;
    use glow_core::TiltSample;

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (tx, rx) = bounded(1);
        let mut sink = ChannelPixelSink::new(tx);
        assert!(sink.push_pixels(&[Rgb::BLUE]));
        assert!(!sink.push_pixels(&[Rgb::BLACK]));
        assert_eq!(rx.try_recv().unwrap().pixels, vec![Rgb::BLUE]);
    }

    #[test]
    fn test_console_overwrites_with_carriage_return() {
        let mut sink = ConsoleDiagnostics::new(Vec::new());
        let line = DiagnosticLine::new("=~=".to_string(), TiltSample::synthetic(0.0), 1.0);
        sink.write_line(&line).unwrap();
        sink.write_line(&line).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.matches('\r').count(), 2);
        assert!(!text.contains('\n'));
        assert!(text.starts_with("\r[SIM] Tilt (X): 0.00 | Pos: 1.00 | Flow: [=~=] "));
    }

    #[test]
    fn test_pair_splits_pixels_and_lines() {
        let (tx, rx) = bounded(4);
        let mut sink = SinkPair::new(ChannelPixelSink::new(tx), LogDiagnostics);
        let line = DiagnosticLine::new("~".to_string(), TiltSample::live(0.5), 0.0);
        assert!(sink.push_pixels(&[Rgb::BLUE]));
        assert!(sink.write_line(&line).is_ok());
        assert_eq!(rx.try_recv().unwrap().pixels, vec![Rgb::BLUE]);
    }
}
