use glow_core::{Glyph, GlowSettings, Rgb, SharedTilt, TiltSample};
use glow_runtime::{
    ChannelPixelSink, DiagnosticLine, DiagnosticSink, GlowPipeline, PixelSink, RenderLoop,
    SinkPair,
};
use glow_sensor::{ManualClock, NoSensor, SyntheticWave, TiltProducer, TiltSource};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Helpers ──────────────────────────────────────────────────────

/// Keeps every frame and line it receives.
#[derive(Clone, Default)]
struct Recorder {
    pixels: Arc<Mutex<Vec<Vec<Rgb>>>>,
    lines: Arc<Mutex<Vec<DiagnosticLine>>>,
}

impl PixelSink for Recorder {
    fn push_pixels(&mut self, pixels: &[Rgb]) -> bool {
        self.pixels.lock().unwrap().push(pixels.to_vec());
        true
    }
}

impl DiagnosticSink for Recorder {
    fn write_line(&mut self, line: &DiagnosticLine) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.clone());
        Ok(())
    }
}

fn glyphs_for(pixels: &[Rgb], settings: &GlowSettings) -> String {
    pixels
        .iter()
        .map(|px| Glyph::classify(px.brightness(), &settings.glyphs).as_char())
        .collect()
}

// ── 1. Pipeline ──────────────────────────────────────────────────

#[test]
fn pipeline_keeps_mass_inside_under_constant_push() {
    let settings = GlowSettings::default();
    let mut pipeline = GlowPipeline::new(&settings);
    let mut far_hits = 0;
    for _ in 0..500 {
        let frame = pipeline.tick(TiltSample::live(1.0));
        let pos = frame.line.position;
        assert!(pos >= 0.0 && pos < settings.strip_length as f32);
        if frame.wall.is_some() {
            far_hits += 1;
        }
    }
    assert!(far_hits > 0);
}

#[test]
fn diagnostic_line_matches_pushed_pixels() {
    let settings = GlowSettings::default();
    let mut pipeline = GlowPipeline::new(&settings);
    for i in 0..200 {
        let tilt = ((i as f32) * 0.05).sin();
        let frame = pipeline.tick(TiltSample::synthetic(tilt));
        assert_eq!(frame.field.len(), settings.strip_length);
        assert_eq!(frame.line.glyphs, glyphs_for(frame.field.as_slice(), &settings));
        assert_eq!(frame.line.sample, TiltSample::synthetic(tilt));
    }
}

#[test]
fn liveness_flag_only_affects_diagnostics() {
    let settings = GlowSettings::default();
    let mut live = GlowPipeline::new(&settings);
    let mut sim = GlowPipeline::new(&settings);
    for i in 0..50 {
        let v = (i as f32 * 0.2).cos();
        let a = live.tick(TiltSample::live(v));
        let b = sim.tick(TiltSample::synthetic(v));
        assert_eq!(a.field, b.field);
        assert_eq!(a.line.glyphs, b.line.glyphs);
        assert_ne!(a.line.to_string(), b.line.to_string());
    }
}

// ── 2. Threads ───────────────────────────────────────────────────

#[test]
fn render_loop_emits_one_frame_and_line_per_tick() {
    let settings = GlowSettings::default();
    let shared = Arc::new(SharedTilt::new(TiltSample::synthetic(0.6)));
    let recorder = Recorder::default();

    let mut render = RenderLoop::start(
        GlowPipeline::new(&settings),
        shared,
        recorder.clone(),
        Duration::from_millis(1),
        Some(20),
    )
    .unwrap();
    render.wait();

    let pixels = recorder.pixels.lock().unwrap();
    let lines = recorder.lines.lock().unwrap();
    assert_eq!(pixels.len(), 20);
    assert_eq!(lines.len(), 20);
    for (px, line) in pixels.iter().zip(lines.iter()) {
        assert_eq!(px.len(), settings.strip_length);
        assert_eq!(line.glyphs, glyphs_for(px, &settings));
        assert!(line.to_string().starts_with("[SIM] Tilt (X): 0.60"));
    }
    // steady positive tilt pushes the mass away from the center
    assert!(lines[19].position > lines[0].position);
}

#[test]
fn producer_and_renderer_run_side_by_side() {
    let settings = GlowSettings::default();
    let shared = Arc::new(SharedTilt::default());
    let clock = ManualClock::new(2.0);

    let source = TiltSource::new(NoSensor, clock, SyntheticWave::default());
    let mut producer =
        TiltProducer::start(source, shared.clone(), Duration::from_millis(1)).unwrap();

    let (tx, rx) = crossbeam::channel::bounded(64);
    let recorder = Recorder::default();
    let sink = SinkPair::new(ChannelPixelSink::new(tx), recorder.clone());

    let mut render = RenderLoop::start(
        GlowPipeline::new(&settings),
        shared.clone(),
        sink,
        Duration::from_millis(2),
        Some(30),
    )
    .unwrap();
    render.wait();
    producer.stop();

    assert_eq!(render.frames_rendered(), 30);
    let fields: Vec<_> = rx.try_iter().collect();
    assert_eq!(fields.len(), 30);
    assert!(fields.iter().all(|f| f.len() == settings.strip_length));

    let expected = TiltSample::synthetic((2.0f32 * 0.5).sin() * 0.8);
    assert_eq!(shared.latest(), expected);
    assert!(recorder.lines.lock().unwrap().iter().all(|l| !l.sample.source_live));
}
