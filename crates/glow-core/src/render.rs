use crate::color::Rgb;
use crate::fluid::FluidState;
use crate::settings::RenderParams;

/// Colors for every LED on the strip, rebuilt each tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelField {
    pub pixels: Vec<Rgb>,
}

impl PixelField {
    pub fn new(pixels: Vec<Rgb>) -> Self {
        Self { pixels }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }
}

/// Turns the fluid position into a glowing intensity field.
///
/// Each pixel's intensity is an exponential falloff from the water center,
/// modulated by a sine wave that travels along the strip as the shimmer phase
/// advances. The renderer itself holds no per-frame state.
#[derive(Debug, Clone)]
pub struct IntensityRenderer {
    params: RenderParams,
    base_color: Rgb,
    strip_length: usize,
}

impl IntensityRenderer {
    pub fn new(strip_length: usize, base_color: Rgb, params: RenderParams) -> Self {
        Self {
            params,
            base_color,
            strip_length,
        }
    }

    /// Unit intensity of pixel `index` for the given state, in [0, 1].
    pub fn intensity_at(&self, index: usize, state: &FluidState) -> f32 {
        let distance = (index as f32 - state.position).abs();
        let base = (-distance * self.params.glow_decay).exp();

        let depth = self.params.shimmer_depth;
        let wave = (index as f64 * self.params.shimmer_spatial as f64 + state.shimmer_phase).sin();
        let shimmer = wave as f32 * depth + (1.0 - depth);

        (base * shimmer).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, index: usize, state: &FluidState) -> Rgb {
        self.base_color.scale_unit(self.intensity_at(index, state))
    }

    /// Render the full strip.
    pub fn render(&self, state: &FluidState) -> PixelField {
        let pixels = (0..self.strip_length)
            .map(|i| self.color_at(i, state))
            .collect();
        PixelField::new(pixels)
    }
}
