use glow_core::{
    format_glyphs, FluidSimulator, FluidState, GlowSettings, GlyphThresholds, IntensityRenderer,
    PixelField, TiltSample, WallHit,
};

use crate::diagnostic::DiagnosticLine;

/// Everything produced by one render tick.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub field: PixelField,
    pub line: DiagnosticLine,
    pub wall: Option<WallHit>,
}

/// Simulator, renderer and glyph formatter, run in that order once per tick.
pub struct GlowPipeline {
    simulator: FluidSimulator,
    renderer: IntensityRenderer,
    thresholds: GlyphThresholds,
}

impl GlowPipeline {
    pub fn new(settings: &GlowSettings) -> Self {
        Self {
            simulator: FluidSimulator::new(settings.strip_length, settings.fluid),
            renderer: IntensityRenderer::new(
                settings.strip_length,
                settings.base_color,
                settings.render,
            ),
            thresholds: settings.glyphs,
        }
    }

    /// Replace the simulator's starting state.
    pub fn with_state(mut self, state: FluidState) -> Self {
        self.simulator = self.simulator.with_state(state);
        self
    }

    pub fn state(&self) -> &FluidState {
        self.simulator.state()
    }

    pub fn tick(&mut self, sample: TiltSample) -> RenderedFrame {
        let wall = self.simulator.step(sample.value);
        let state = *self.simulator.state();

        let field = self.renderer.render(&state);
        let glyphs = format_glyphs(&field, &self.thresholds);

        RenderedFrame {
            field,
            line: DiagnosticLine::new(glyphs, sample, state.position),
            wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_post_step_position() {
        let mut pipeline = GlowPipeline::new(&GlowSettings::default());
        let frame = pipeline.tick(TiltSample::synthetic(1.0));
        assert_eq!(frame.field.len(), 30);
        assert_eq!(frame.line.glyphs.chars().count(), 30);
        assert!((frame.line.position - 15.196).abs() < 1e-5);
        assert_eq!(frame.line.position, pipeline.state().position);
        assert_eq!(frame.wall, None);
    }
}
