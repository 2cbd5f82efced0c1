use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Physics constants for the fluid simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidParams {
    /// Tilt (G) to acceleration (pixels/tick^2).
    pub tilt_sensitivity: f32,
    /// Per-tick velocity retention. Range: (0, 1]
    pub friction: f32,
    /// Speed limit in pixels per tick. Must stay below the strip length.
    pub max_velocity: f32,
    /// Velocity retained after a wall reflection. Range: 0..1
    pub bounce_damping: f32,
    /// Inset from the far wall after a reflection.
    pub edge_epsilon: f32,
    /// Shimmer phase advance per tick (radians).
    pub shimmer_step: f64,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            tilt_sensitivity: 0.2,
            friction: 0.98,
            max_velocity: 1.0,
            bounce_damping: 0.85,
            edge_epsilon: 0.001,
            shimmer_step: 0.05,
        }
    }
}

/// Intensity field shaping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Exponential falloff per pixel of distance.
    pub glow_decay: f32,
    /// Shimmer wave number (radians per pixel).
    pub shimmer_spatial: f32,
    /// Shimmer modulation depth. Range: 0..1
    pub shimmer_depth: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            glow_decay: 0.5,
            shimmer_spatial: 0.3,
            shimmer_depth: 0.2,
        }
    }
}

/// Brightness cut-offs for the diagnostic glyphs. A pixel gets the glyph of
/// the first threshold it strictly exceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphThresholds {
    pub bright: u8,
    pub body: u8,
    pub dim: u8,
}

impl Default for GlyphThresholds {
    fn default() -> Self {
        Self { bright: 180, body: 50, dim: 10 }
    }
}

/// Per-iteration delays of the two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskTiming {
    pub tilt_period_ms: u64,
    pub render_period_ms: u64,
}

impl TaskTiming {
    pub fn tilt_period(&self) -> Duration {
        Duration::from_millis(self.tilt_period_ms)
    }

    pub fn render_period(&self) -> Duration {
        Duration::from_millis(self.render_period_ms)
    }
}

impl Default for TaskTiming {
    fn default() -> Self {
        Self {
            tilt_period_ms: 20,
            render_period_ms: 33,
        }
    }
}

/// Accelerometer and fallback waveform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// 7-bit I2C address of the accelerometer.
    pub address: u8,
    /// Bus settle time before the first probe.
    pub settle_ms: u32,
    /// Time allowed for the sensor to leave sleep mode.
    pub wake_ms: u32,
    /// Angular rate of the synthetic tilt wave (rad/s).
    pub synthetic_rate: f32,
    /// Peak of the synthetic tilt wave (G).
    pub synthetic_amplitude: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: 0x68,
            settle_ms: 100,
            wake_ms: 50,
            synthetic_rate: 0.5,
            synthetic_amplitude: 0.8,
        }
    }
}

/// Every tunable of the animation. Fixed once the tasks start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowSettings {
    /// Number of LEDs on the strip.
    pub strip_length: usize,
    /// Hue of the water glow.
    pub base_color: Rgb,
    /// Global strip brightness applied by output sinks. Range: 0..255
    pub brightness: u8,
    pub fluid: FluidParams,
    pub render: RenderParams,
    pub glyphs: GlyphThresholds,
    pub timing: TaskTiming,
    pub sensor: SensorConfig,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            strip_length: 30,
            base_color: Rgb::BLUE,
            brightness: 150,
            fluid: FluidParams::default(),
            render: RenderParams::default(),
            glyphs: GlyphThresholds::default(),
            timing: TaskTiming::default(),
            sensor: SensorConfig::default(),
        }
    }
}

impl GlowSettings {
    /// Check the constraints the simulator relies on.
    ///
    /// The wall handling resolves at most one reflection per tick, which only
    /// holds while a single tick cannot carry the mass across the whole strip.
    pub fn validate(&self) -> Result<(), String> {
        let f = &self.fluid;
        if self.strip_length == 0 {
            return Err("strip_length must be at least 1".to_string());
        }
        if !(f.max_velocity > 0.0 && f.max_velocity < self.strip_length as f32) {
            return Err(format!(
                "max_velocity {} must be in (0, strip_length = {})",
                f.max_velocity, self.strip_length
            ));
        }
        if !(f.friction > 0.0 && f.friction <= 1.0) {
            return Err(format!("friction {} must be in (0, 1]", f.friction));
        }
        if !(0.0..=1.0).contains(&f.bounce_damping) {
            return Err(format!("bounce_damping {} must be in [0, 1]", f.bounce_damping));
        }
        if !(f.edge_epsilon > 0.0 && f.edge_epsilon < 1.0) {
            return Err(format!("edge_epsilon {} must be in (0, 1)", f.edge_epsilon));
        }
        let far = self.strip_length as f32;
        if !(far - f.edge_epsilon < far) {
            return Err(format!(
                "edge_epsilon {} is lost to rounding at strip_length {}",
                f.edge_epsilon, self.strip_length
            ));
        }
        if !(self.render.glow_decay >= 0.0) {
            return Err(format!("glow_decay {} must be non-negative", self.render.glow_decay));
        }
        if !(0.0..=1.0).contains(&self.render.shimmer_depth) {
            return Err(format!(
                "shimmer_depth {} must be in [0, 1]",
                self.render.shimmer_depth
            ));
        }
        if self.timing.tilt_period_ms == 0 || self.timing.render_period_ms == 0 {
            return Err("task periods must be non-zero".to_string());
        }
        Ok(())
    }
}

/// Save settings to disk as pretty JSON.
pub fn save_settings(path: &Path, settings: &GlowSettings) -> io::Result<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Load settings from disk. Missing fields take their defaults; the result is
/// validated before it is returned.
pub fn load_settings(path: &Path) -> io::Result<GlowSettings> {
    let json = std::fs::read_to_string(path)?;
    let settings: GlowSettings = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    settings
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(settings)
}
