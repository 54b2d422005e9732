/// Fixed timestep accumulator.
/// Physics always advances in whole `dt` ticks regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

/// Most ticks a single frame may request.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f64);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
