use embedded_hal::delay::DelayNs;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Elapsed-time source for the synthetic wave.
pub trait Clock {
    /// Seconds since the clock was started.
    fn monotonic_seconds(&self) -> f32;
}

/// Wall clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn monotonic_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and move the other into a tilt source.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU32>);

impl ManualClock {
    pub fn new(seconds: f32) -> Self {
        Self(Arc::new(AtomicU32::new(seconds.to_bits())))
    }

    pub fn set(&self, seconds: f32) {
        self.0.store(seconds.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: f32) {
        self.set(self.monotonic_seconds() + seconds);
    }
}

impl Clock for ManualClock {
    fn monotonic_seconds(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Blocking delay on the host, for drivers that take a `DelayNs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}
