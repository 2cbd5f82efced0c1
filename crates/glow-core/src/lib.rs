pub mod color;
pub mod tilt;
pub mod settings;
pub mod fluid;
pub mod render;
pub mod glyph;

pub use color::Rgb;
pub use tilt::{SharedTilt, TiltSample};
pub use settings::{
    load_settings, save_settings, FluidParams, GlowSettings, GlyphThresholds, RenderParams,
    SensorConfig, TaskTiming,
};
pub use fluid::{FluidSimulator, FluidState, WallHit};
pub use render::{IntensityRenderer, PixelField};
pub use glyph::{format_glyphs, Glyph};
