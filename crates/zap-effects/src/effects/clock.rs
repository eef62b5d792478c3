//! Effect clock: the time/progress state machine shared by every effect.
//!
//! One [`EffectCore::begin_step`] + [`EffectCore::advance`] pair is one
//! update step. The split exists so the owning effect can restore its
//! component between the loop check and the clock advance.

use crate::api::types::NodeId;
use super::curve::Curve;

/// Direction the clock currently runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// +1.0 forward, -1.0 backward.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Outcome of the pre-advance half of an update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep going from the current state.
    Continue,
    /// An infinite effect closed its loop; the owner must reset before advancing.
    Restart,
}

/// Completion callback. Single-threaded, so no `Send` bound.
pub type OnComplete = Box<dyn FnMut()>;

/// Timing state of one effect.
pub struct EffectCore {
    initial_infinite: bool,
    initial_alternating: bool,
    is_infinite: bool,
    is_alternating: bool,
    is_relative: bool,
    skip_reset: bool,
    paused: bool,
    disposed: bool,
    is_root: bool,
    target: Option<NodeId>,
    curve: Curve,
    on_complete: Option<OnComplete>,

    percentage: Option<f32>,
    eased_progress: f32,
    peak_time: f32,
    current_time: f32,
    drift_time: f32,
    direction: Direction,
}

impl std::fmt::Debug for EffectCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectCore")
            .field("is_infinite", &self.is_infinite)
            .field("is_alternating", &self.is_alternating)
            .field("is_relative", &self.is_relative)
            .field("disposed", &self.disposed)
            .field("is_root", &self.is_root)
            .field("target", &self.target)
            .field("curve", &self.curve)
            .field("percentage", &self.percentage)
            .field("peak_time", &self.peak_time)
            .field("current_time", &self.current_time)
            .field("drift_time", &self.drift_time)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl EffectCore {
    /// A detached, unstarted clock with one-direction duration `peak_time`.
    pub fn new(peak_time: f32, is_relative: bool) -> Self {
        Self {
            initial_infinite: false,
            initial_alternating: false,
            is_infinite: false,
            is_alternating: false,
            is_relative,
            skip_reset: false,
            paused: false,
            disposed: false,
            is_root: false,
            target: None,
            curve: Curve::Linear,
            on_complete: None,
            percentage: None,
            eased_progress: 0.0,
            peak_time,
            current_time: 0.0,
            drift_time: 0.0,
            direction: Direction::Forward,
        }
    }

    // -- Configuration (construction time) --

    /// Set whether the effect loops forever. Also becomes the value restored on reset.
    pub fn set_infinite(&mut self, infinite: bool) {
        self.initial_infinite = infinite;
        self.is_infinite = infinite;
    }

    /// Set whether the effect plays back after reaching its end. Also becomes the value restored on reset.
    pub fn set_alternating(&mut self, alternating: bool) {
        self.initial_alternating = alternating;
        self.is_alternating = alternating;
    }

    pub fn set_curve(&mut self, curve: Curve) {
        self.curve = curve;
    }

    pub fn set_skip_reset(&mut self, skip: bool) {
        self.skip_reset = skip;
    }

    pub fn set_on_complete(&mut self, callback: OnComplete) {
        self.on_complete = Some(callback);
    }

    pub fn set_peak_time(&mut self, peak_time: f32) {
        self.peak_time = peak_time;
    }

    // -- Runtime flags --

    /// Temporarily override looping until the next reset.
    pub fn override_infinite(&mut self, infinite: bool) {
        self.is_infinite = infinite;
    }

    /// Temporarily override alternation until the next reset.
    pub fn override_alternating(&mut self, alternating: bool) {
        self.is_alternating = alternating;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn set_root(&mut self, root: bool) {
        self.is_root = root;
    }

    /// Bind to a node. Clears any drift left over from a previous attachment.
    pub fn attach(&mut self, node: NodeId) {
        self.target = Some(node);
        self.drift_time = 0.0;
    }

    /// Drop the node handle and root status.
    pub fn detach(&mut self) {
        self.target = None;
        self.is_root = false;
    }

    // -- Accessors --

    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }

    pub fn is_alternating(&self) -> bool {
        self.is_alternating
    }

    pub fn is_relative(&self) -> bool {
        self.is_relative
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn skips_reset(&self) -> bool {
        self.skip_reset
    }

    /// Node this effect is attached to, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Linear progress in [0, 1]; `None` before the first advance.
    pub fn percentage(&self) -> Option<f32> {
        self.percentage
    }

    /// `percentage` passed through the curve; 0 before the first advance.
    pub fn eased_progress(&self) -> f32 {
        self.eased_progress
    }

    pub fn peak_time(&self) -> f32 {
        self.peak_time
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn drift_time(&self) -> f32 {
        self.drift_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Duration of one full iteration: the peak time, doubled when alternating.
    pub fn iteration_time(&self) -> f32 {
        if self.is_alternating {
            self.peak_time * 2.0
        } else {
            self.peak_time
        }
    }

    pub fn is_at_max(&self) -> bool {
        self.percentage == Some(1.0)
    }

    pub fn is_at_min(&self) -> bool {
        self.percentage == Some(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.disposed || self.reached_end()
    }

    fn reached_end(&self) -> bool {
        !self.is_infinite && self.closed_pass()
    }

    // An alternating pass only closes at min on the way back; sitting at
    // min before the turn is just the start.
    fn closed_pass(&self) -> bool {
        if self.is_alternating {
            self.is_at_min() && self.direction == Direction::Backward
        } else {
            self.is_at_max()
        }
    }

    // -- State machine --

    /// First half of an update step: orient the clock and detect loop closure.
    pub fn begin_step(&mut self) -> Step {
        if self.is_alternating && self.is_at_max() {
            self.direction = Direction::Backward;
        }
        if self.is_infinite && self.closed_pass() {
            return Step::Restart;
        }
        if self.is_alternating && self.is_at_min() {
            self.direction = Direction::Forward;
        }
        Step::Continue
    }

    /// Second half of an update step. Returns `false` if the clock was
    /// already complete and nothing moved.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.is_complete() {
            return false;
        }
        let incoming = dt + self.drift_time;
        self.current_time += incoming * self.direction.sign();

        let percentage = if self.peak_time > 0.0 {
            (self.current_time / self.peak_time).clamp(0.0, 1.0)
        } else {
            // Zero-length effects sit on whichever boundary they are heading to.
            match self.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            }
        };
        self.percentage = Some(percentage);
        self.eased_progress = self.curve.transform(percentage);

        self.drift_time = if self.peak_time <= 0.0 {
            // A zero-length pass consumes nothing and hands all its time on.
            // Infinite ones would loop on it forever, so they keep none.
            if self.is_infinite { 0.0 } else { incoming }
        } else if self.is_at_max() {
            (self.current_time - self.peak_time).max(0.0)
        } else if self.is_at_min() {
            self.current_time.abs()
        } else {
            0.0
        };
        self.current_time = self.current_time.clamp(0.0, self.peak_time.max(0.0));

        if self.reached_end() {
            self.disposed = true;
        }
        true
    }

    /// Restore the construction-time configuration and rewind the clock.
    /// Drift is kept so a looping effect carries its overshoot into the next pass.
    pub fn reset(&mut self) {
        self.is_infinite = self.initial_infinite;
        self.is_alternating = self.initial_alternating;
        self.disposed = false;
        self.percentage = None;
        self.eased_progress = 0.0;
        self.current_time = 0.0;
        self.direction = Direction::Forward;
    }

    /// Rewind completely, dropping any carried drift.
    pub fn rewind(&mut self) {
        self.reset();
        self.drift_time = 0.0;
    }

    /// Put the clock at its end, about to run backward to the start.
    /// Used by composites replaying a child in reverse.
    pub fn rewind_to_end(&mut self) {
        self.reset();
        self.drift_time = 0.0;
        self.current_time = self.peak_time.max(0.0);
        self.percentage = Some(1.0);
        self.eased_progress = self.curve.transform(1.0);
        self.direction = Direction::Backward;
        // Completion for a backward pass is reaching min.
        self.is_alternating = true;
    }

    /// Fire the completion callback, if any.
    pub fn notify_complete(&mut self) {
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(core: &mut EffectCore, dt: f32) {
        if core.begin_step() == Step::Restart {
            core.reset();
        }
        core.advance(dt);
    }

    #[test]
    fn unstarted_is_neither_min_nor_max() {
        let core = EffectCore::new(1.0, false);
        assert_eq!(core.percentage(), None);
        assert!(!core.is_at_min());
        assert!(!core.is_at_max());
        assert!(!core.is_complete());
    }

    #[test]
    fn completes_at_forward_max_and_freezes() {
        let mut core = EffectCore::new(2.0, false);
        step(&mut core, 0.5);
        step(&mut core, 1.0);
        assert_eq!(core.percentage(), Some(0.75));
        assert!(!core.is_complete());

        step(&mut core, 0.5);
        assert_eq!(core.percentage(), Some(1.0));
        assert!(core.is_complete());
        assert!(core.is_disposed());

        let before = (core.current_time(), core.drift_time());
        step(&mut core, 5.0);
        assert_eq!(core.percentage(), Some(1.0));
        assert_eq!((core.current_time(), core.drift_time()), before);
    }

    #[test]
    fn alternating_completes_only_back_at_min() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        assert_eq!(core.iteration_time(), 2.0);

        step(&mut core, 1.0);
        assert!(core.is_at_max());
        assert!(!core.is_complete());

        step(&mut core, 0.5);
        assert_eq!(core.direction(), Direction::Backward);
        assert_eq!(core.percentage(), Some(0.5));
        assert!(!core.is_complete());

        step(&mut core, 0.5);
        assert!(core.is_at_min());
        assert!(core.is_complete());
    }

    #[test]
    fn infinite_restarts_and_never_completes() {
        let mut core = EffectCore::new(1.0, false);
        core.set_infinite(true);
        for _ in 0..10 {
            step(&mut core, 0.4);
            assert!(!core.is_complete());
            assert!(!core.is_disposed());
        }
        // 4.0s in lands on a loop boundary, give or take float error.
        let pct = core.percentage().unwrap();
        assert!(pct < 0.05 || (pct - 1.0).abs() < 0.05, "pct was {}", pct);
    }

    #[test]
    fn infinite_loop_restarts_near_zero() {
        let mut core = EffectCore::new(1.0, false);
        core.set_infinite(true);
        step(&mut core, 1.0);
        assert!(core.is_at_max());

        step(&mut core, 0.1);
        let pct = core.percentage().unwrap();
        assert!((pct - 0.1).abs() < 1e-5, "pct was {}", pct);
        assert!(!core.is_disposed());
    }

    #[test]
    fn overshoot_is_recorded_as_drift() {
        let mut core = EffectCore::new(1.0, false);
        step(&mut core, 1.25);
        assert!(core.is_at_max());
        assert!((core.drift_time() - 0.25).abs() < 1e-6);
        assert_eq!(core.current_time(), 1.0);
    }

    #[test]
    fn drift_carries_across_direction_flip() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        step(&mut core, 1.25);
        assert!((core.drift_time() - 0.25).abs() < 1e-6);

        // Backward pass starts where the overshoot left off: 1.0 - (0.25 + 0.25).
        step(&mut core, 0.25);
        assert!((core.percentage().unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(core.drift_time(), 0.0);
    }

    #[test]
    fn drift_conserves_total_time_through_loops() {
        let mut core = EffectCore::new(1.0, false);
        core.set_infinite(true);
        step(&mut core, 1.5);
        assert!((core.drift_time() - 0.5).abs() < 1e-6);

        // 1.5 + 0.25 = 1.75s in: one full loop plus 0.75.
        step(&mut core, 0.25);
        assert!((core.percentage().unwrap() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn undershoot_below_zero_is_drift() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        core.set_infinite(true);
        step(&mut core, 1.0);
        step(&mut core, 1.5);
        assert!(core.is_at_min());
        assert!((core.drift_time() - 0.5).abs() < 1e-6);
        assert_eq!(core.current_time(), 0.0);
    }

    #[test]
    fn zero_peak_time_completes_immediately() {
        let mut core = EffectCore::new(0.0, false);
        step(&mut core, 0.016);
        assert!(core.is_complete());
        assert_eq!(core.drift_time(), 0.016);
    }

    #[test]
    fn zero_peak_time_passes_carried_drift_on() {
        let mut core = EffectCore::new(0.0, false);
        core.set_alternating(true);
        step(&mut core, 0.25);
        assert!(core.is_at_max());
        assert!(!core.is_complete());
        assert_eq!(core.drift_time(), 0.25);

        step(&mut core, 0.5);
        assert!(core.is_complete());
        assert_eq!(core.drift_time(), 0.75);
    }

    #[test]
    fn infinite_zero_peak_time_keeps_no_drift() {
        let mut core = EffectCore::new(0.0, false);
        core.set_infinite(true);
        for _ in 0..5 {
            step(&mut core, 0.1);
            assert_eq!(core.drift_time(), 0.0);
            assert!(!core.is_complete());
        }
    }

    #[test]
    fn zero_dt_leaves_unstarted_alternating_running() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        step(&mut core, 0.0);
        assert!(core.is_at_min());
        assert!(!core.is_complete());
        assert!(!core.is_disposed());

        step(&mut core, 0.5);
        assert_eq!(core.direction(), Direction::Forward);
        assert_eq!(core.percentage(), Some(0.5));
    }

    #[test]
    fn zero_dt_does_not_restart_infinite_alternating() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        core.set_infinite(true);
        step(&mut core, 0.0);
        assert_eq!(core.begin_step(), Step::Continue);
        core.advance(0.25);
        assert_eq!(core.percentage(), Some(0.25));
    }

    #[test]
    fn infinite_alternating_restarts_after_return() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        core.set_infinite(true);
        step(&mut core, 1.0);
        step(&mut core, 1.0);
        assert!(core.is_at_min());
        assert_eq!(core.begin_step(), Step::Restart);
    }

    #[test]
    fn zero_dt_on_non_alternating_is_a_no_op() {
        let mut core = EffectCore::new(1.0, false);
        step(&mut core, 0.0);
        assert_eq!(core.percentage(), Some(0.0));
        assert!(!core.is_complete());
        assert_eq!(core.drift_time(), 0.0);
    }

    #[test]
    fn reset_restores_initial_flags() {
        let mut core = EffectCore::new(1.0, false);
        core.set_alternating(true);
        core.override_alternating(false);
        core.override_infinite(true);
        step(&mut core, 0.3);
        core.dispose();

        core.reset();
        assert!(core.is_alternating());
        assert!(!core.is_infinite());
        assert!(!core.is_disposed());
        assert_eq!(core.percentage(), None);
        assert_eq!(core.current_time(), 0.0);
        assert_eq!(core.direction(), Direction::Forward);
    }

    #[test]
    fn rewind_to_end_runs_backward_to_completion() {
        let mut core = EffectCore::new(1.0, false);
        core.rewind_to_end();
        step(&mut core, 0.5);
        assert_eq!(core.percentage(), Some(0.5));
        step(&mut core, 0.5);
        assert!(core.is_complete());
    }

    #[test]
    fn eased_progress_follows_curve() {
        let mut core = EffectCore::new(1.0, false);
        core.set_curve(Curve::QuadIn);
        step(&mut core, 0.5);
        assert!((core.eased_progress() - 0.25).abs() < 1e-6);
    }
}
