use std::sync::atomic::{AtomicU64, Ordering};

const LIVE_BIT: u64 = 1 << 32;

/// One tilt reading as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltSample {
    /// Normalized acceleration in G, nominally [-1, 1]. Not clamped.
    pub value: f32,
    /// True when the value came from sensor hardware.
    pub source_live: bool,
}

impl TiltSample {
    pub fn live(value: f32) -> Self {
        Self { value, source_live: true }
    }

    pub fn synthetic(value: f32) -> Self {
        Self { value, source_live: false }
    }

    /// Mode tag shown in diagnostics.
    pub fn mode_tag(&self) -> &'static str {
        if self.source_live { "[H/W]" } else { "[SIM]" }
    }

    fn pack(self) -> u64 {
        let flag = if self.source_live { LIVE_BIT } else { 0 };
        flag | self.value.to_bits() as u64
    }

    fn unpack(bits: u64) -> Self {
        Self {
            value: f32::from_bits(bits as u32),
            source_live: bits & LIVE_BIT != 0,
        }
    }
}

/// Single-slot, last-write-wins mailbox between the tilt task and the
/// render task.
///
/// Value and liveness flag are packed into one `AtomicU64`, so a reader can
/// never pair a fresh value with a stale flag. Writers never block and
/// overwritten samples are gone.
#[derive(Debug, Default)]
pub struct SharedTilt(AtomicU64);

impl SharedTilt {
    pub fn new(sample: TiltSample) -> Self {
        Self(AtomicU64::new(sample.pack()))
    }

    pub fn publish(&self, sample: TiltSample) {
        self.0.store(sample.pack(), Ordering::Relaxed);
    }

    pub fn latest(&self) -> TiltSample {
        TiltSample::unpack(self.0.load(Ordering::Relaxed))
    }

    /// Raw packed word, for bit-exact comparisons.
    pub fn raw(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
