//! Tilt producer: background thread that keeps the shared tilt slot fresh.
//!
//! Runs on its own cadence with a fixed sleep per iteration and never waits
//! on the render thread; the slot only ever holds the latest sample.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glow_core::SharedTilt;

use crate::clock::Clock;
use crate::sensor::TiltSensor;
use crate::source::TiltSource;

/// Background tilt sampling thread.
pub struct TiltProducer {
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TiltProducer {
    /// Start polling `source` every `period` into `shared`.
    ///
    /// The sensor handshake runs on the new thread before the first sample if
    /// it has not been run already.
    pub fn start<S, C>(
        mut source: TiltSource<S, C>,
        shared: Arc<SharedTilt>,
        period: Duration,
    ) -> Result<Self, String>
    where
        S: TiltSensor + Send + 'static,
        C: Clock + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let thread = thread::Builder::new()
            .name("tilt-producer".to_string())
            .spawn(move || {
                source.detect();
                while running_clone.load(Ordering::Relaxed) {
                    source.poll(&shared);
                    thread::sleep(period);
                }
            })
            .map_err(|e| format!("Failed to spawn tilt producer thread: {}", e))?;

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    /// Signal the producer to stop and wait for it to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    /// Check if the producer is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Drop for TiltProducer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sensor::NoSensor;
    use crate::synthetic::SyntheticWave;
    use glow_core::TiltSample;
    use std::time::Instant;

    #[test]
    fn test_producer_publishes_synthetic_samples() {
        let clock = ManualClock::new(3.0);
        let source = TiltSource::new(NoSensor, clock.clone(), SyntheticWave::default());
        let shared = Arc::new(SharedTilt::new(TiltSample::live(9.0)));

        let mut producer =
            TiltProducer::start(source, shared.clone(), Duration::from_millis(1)).unwrap();

        let expected = TiltSample::synthetic((3.0f32 * 0.5).sin() * 0.8);
        let deadline = Instant::now() + Duration::from_secs(5);
        while shared.latest() != expected && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(shared.latest(), expected);

        producer.stop();
        assert!(!producer.is_running());
    }
}
