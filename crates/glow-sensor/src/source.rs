use glow_core::{SharedTilt, TiltSample};

use crate::clock::Clock;
use crate::sensor::TiltSensor;
use crate::synthetic::SyntheticWave;

/// Outcome of the one-time sensor handshake.
///
/// Leaves `Unknown` exactly once and never returns to it; a sensor that
/// appears later is not picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionState {
    Unknown,
    Live,
    Absent,
}

/// Produces tilt samples from a sensor, or from the synthetic wave when the
/// sensor did not answer its handshake.
pub struct TiltSource<S, C> {
    sensor: S,
    clock: C,
    wave: SyntheticWave,
    state: DetectionState,
}

impl<S: TiltSensor, C: Clock> TiltSource<S, C> {
    pub fn new(sensor: S, clock: C, wave: SyntheticWave) -> Self {
        Self {
            sensor,
            clock,
            wave,
            state: DetectionState::Unknown,
        }
    }

    pub fn state(&self) -> DetectionState {
        self.state
    }

    /// Run the handshake if it has not run yet and return the latched result.
    pub fn detect(&mut self) -> DetectionState {
        if self.state == DetectionState::Unknown {
            self.state = if self.sensor.try_init() {
                log::info!("Tilt sensor detected, using hardware readings");
                DetectionState::Live
            } else {
                log::warn!("No tilt sensor found, using simulated tilt");
                DetectionState::Absent
            };
        }
        self.state
    }

    /// One cycle: read or synthesize a sample and publish it.
    ///
    /// Returns the published sample. A failed hardware read publishes
    /// nothing and returns `None`, leaving the slot exactly as it was.
    pub fn poll(&mut self, shared: &SharedTilt) -> Option<TiltSample> {
        let sample = match self.detect() {
            DetectionState::Live => TiltSample::live(self.sensor.try_read()?),
            _ => {
                let t = self.clock.monotonic_seconds();
                TiltSample::synthetic(self.wave.value_at(t))
            }
        };
        shared.publish(sample);
        Some(sample)
    }
}
