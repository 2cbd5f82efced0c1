use crate::settings::FluidParams;

/// Physical state of the simulated water mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    /// Glow center in pixels, kept in [0, strip_length).
    pub position: f32,
    /// Pixels per tick, kept in [-max_velocity, max_velocity].
    pub velocity: f32,
    /// Shimmer wave phase in radians. Grows every tick and is never wrapped.
    pub shimmer_phase: f64,
}

impl FluidState {
    /// Mass at rest in the middle of the strip.
    pub fn centered(strip_length: usize) -> Self {
        Self {
            position: strip_length as f32 / 2.0,
            velocity: 0.0,
            shimmer_phase: 0.0,
        }
    }
}

/// Which end of the strip reflected the mass during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    Near,
    Far,
}

/// One-dimensional damped point mass driven by tilt.
///
/// Advanced exactly once per render tick. Reflections lose energy according
/// to `bounce_damping`; at most one wall is resolved per tick.
#[derive(Debug, Clone)]
pub struct FluidSimulator {
    params: FluidParams,
    strip_length: f32,
    state: FluidState,
}

impl FluidSimulator {
    pub fn new(strip_length: usize, params: FluidParams) -> Self {
        Self {
            params,
            strip_length: strip_length as f32,
            state: FluidState::centered(strip_length),
        }
    }

    /// Start from an explicit state instead of the centered rest state.
    pub fn with_state(mut self, state: FluidState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &FluidState {
        &self.state
    }

    /// Integrate one tick with the given tilt (G).
    ///
    /// Returns the wall that reflected the mass, if any.
    pub fn step(&mut self, tilt: f32) -> Option<WallHit> {
        let p = self.params;
        let acceleration = if tilt.is_finite() { tilt * p.tilt_sensitivity } else { 0.0 };

        let s = &mut self.state;
        s.velocity += acceleration;
        s.velocity *= p.friction;
        s.velocity = s.velocity.max(-p.max_velocity).min(p.max_velocity);
        s.position += s.velocity;

        let hit = self.resolve_walls();
        self.state.shimmer_phase += p.shimmer_step;
        hit
    }

    /// Clamp the position back inside the strip and reflect the velocity.
    pub fn resolve_walls(&mut self) -> Option<WallHit> {
        let damping = self.params.bounce_damping;
        let s = &mut self.state;

        if s.position < 0.0 {
            s.position = 0.0;
            s.velocity = -s.velocity * damping;
            Some(WallHit::Near)
        } else if s.position >= self.strip_length {
            s.position = far_rest(self.strip_length, self.params.edge_epsilon);
            s.velocity = -s.velocity * damping;
            Some(WallHit::Far)
        } else {
            None
        }
    }
}

/// Resting position after a far-wall bounce.
///
/// On long strips the inset can round back up to `strip_length`; fall to the
/// next float below it so the position stays strictly inside.
fn far_rest(strip_length: f32, edge_epsilon: f32) -> f32 {
    let inset = strip_length - edge_epsilon;
    if inset < strip_length {
        inset
    } else {
        f32::from_bits(strip_length.to_bits() - 1)
    }
}
