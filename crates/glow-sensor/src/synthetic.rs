use glow_core::SensorConfig;

/// Fallback tilt used when no sensor answered at startup: a slow sine sway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticWave {
    /// Angular rate in rad/s.
    pub rate: f32,
    /// Peak tilt in G.
    pub amplitude: f32,
}

impl Default for SyntheticWave {
    fn default() -> Self {
        Self { rate: 0.5, amplitude: 0.8 }
    }
}

impl SyntheticWave {
    pub fn from_config(config: &SensorConfig) -> Self {
        Self {
            rate: config.synthetic_rate,
            amplitude: config.synthetic_amplitude,
        }
    }

    /// Tilt at `t` seconds since start. Pure: same `t`, same value.
    pub fn value_at(&self, t: f32) -> f32 {
        (t * self.rate).sin() * self.amplitude
    }
}
