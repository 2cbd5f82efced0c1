//! Render loop: the animation thread.
//!
//! Each iteration reads the latest tilt, advances the pipeline once, hands
//! the pixels and the diagnostic line to the sink, then sleeps a fixed
//! period. It never waits on the tilt producer.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glow_core::SharedTilt;

use crate::pipeline::GlowPipeline;
use crate::sink::{DiagnosticSink, PixelSink};

/// Background render thread.
pub struct RenderLoop {
    running: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    thread: Option<thread::JoinHandle<()>>,
}

impl RenderLoop {
    /// Start rendering every `period`.
    ///
    /// With `frame_limit` set the loop ends by itself after that many ticks;
    /// otherwise it runs until `stop()`.
    pub fn start<K>(
        mut pipeline: GlowPipeline,
        shared: Arc<SharedTilt>,
        mut sink: K,
        period: Duration,
        frame_limit: Option<u64>,
    ) -> Result<Self, String>
    where
        K: PixelSink + DiagnosticSink + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let frames = Arc::new(AtomicU64::new(0));
        let running_clone = running.clone();
        let frames_clone = frames.clone();

        let thread = thread::Builder::new()
            .name("glow-render".to_string())
            .spawn(move || {
                let mut sink_failed = false;
                let mut done = 0;
                while running_clone.load(Ordering::Relaxed) {
                    // Checked before ticking so a zero limit renders nothing.
                    if frame_limit.is_some_and(|limit| done >= limit) {
                        break;
                    }

                    let sample = shared.latest();
                    let frame = pipeline.tick(sample);

                    if !sink.push_pixels(frame.field.as_slice()) {
                        log::trace!("Pixel frame dropped");
                    }
                    if let Err(e) = sink.write_line(&frame.line) {
                        // Report once; the animation keeps running regardless.
                        if !sink_failed {
                            log::warn!("Diagnostic output failed: {}", e);
                            sink_failed = true;
                        }
                    }

                    done = frames_clone.fetch_add(1, Ordering::Relaxed) + 1;
                    thread::sleep(period);
                }
                running_clone.store(false, Ordering::Relaxed);
            })
            .map_err(|e| format!("Failed to spawn render thread: {}", e))?;

        Ok(Self {
            running,
            frames,
            thread: Some(thread),
        })
    }

    /// Number of ticks rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Block until the loop ends on its own (frame limit) or is stopped.
    pub fn wait(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Render thread panicked");
            }
        }
    }

    /// Signal the loop to stop and wait for it to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.wait();
    }

    /// Check if the loop is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
