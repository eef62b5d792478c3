/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of equal effect steps,
/// so effect timing does not depend on the display's frame rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Upper bound on steps per frame; time beyond it is dropped.
    max_steps: u32,
    /// Accumulated time not yet consumed by a step.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to avoid a spiral of death after a long stall.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(0.25, 10);
        assert_eq!(ts.accumulate(0.25), 1);
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut ts = FixedTimestep::new(1.0 / 60.0, 10);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::new(1.0 / 60.0, 4);
        assert_eq!(ts.accumulate(1.0), 4);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(0.5, 10);
        assert_eq!(ts.accumulate(-3.0), 0);
        assert_eq!(ts.accumulate(0.5), 1);
    }

    #[test]
    fn reset_drops_partial_time() {
        let mut ts = FixedTimestep::new(0.5, 10);
        ts.accumulate(0.4);
        ts.reset();
        assert_eq!(ts.accumulate(0.375), 0);
        // 0.625 accumulated: one step, not the two the dropped 0.4 would give.
        assert_eq!(ts.accumulate(0.25), 1);
    }
}
