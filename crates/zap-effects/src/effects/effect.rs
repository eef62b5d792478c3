// effects/effect.rs
//
// The Effect trait: what the effects handler and composite effects drive.
// Timing lives in EffectCore; implementors decide what state they capture,
// restore and interpolate.

use crate::api::types::NodeId;
use crate::core::transform::{Transform, TransformMask};
use super::clock::{EffectCore, Step};
use super::curve::Curve;

/// A time-driven mutator of a node's transform.
pub trait Effect {
    fn core(&self) -> &EffectCore;
    fn core_mut(&mut self) -> &mut EffectCore;

    /// Attach to `node`, capturing `transform` as the state before this
    /// effect touched it and resolving the end state.
    fn initialize(&mut self, node: NodeId, transform: &Transform);

    /// Fields this effect writes.
    fn modifies(&self) -> TransformMask;

    /// Write the value for the current eased progress into `target`.
    fn apply_progress(&mut self, target: &mut Transform);

    /// Commit the original snapshot. No-op unless this is the root effect.
    fn apply_original_state(&self, target: &mut Transform);

    /// Commit the end snapshot. No-op unless this is the root effect.
    fn apply_end_state(&self, target: &mut Transform);

    /// Write the end snapshot regardless of root status. Composites use this
    /// on scratch transforms to chain their children.
    fn write_end_snapshot(&self, target: &mut Transform);

    /// Ungated write of the state this effect rests in once finished.
    /// Alternating effects come back to where they started.
    fn write_settled_snapshot(&self, target: &mut Transform) {
        if !self.core().is_alternating() {
            self.write_end_snapshot(target);
        }
    }

    /// Advance by `dt` seconds and write the result into `target`.
    fn update(&mut self, dt: f32, target: &mut Transform) {
        if self.tick(dt, target) {
            self.apply_progress(target);
        }
    }

    /// Advance the clock by `dt` seconds without writing progress.
    /// `target` is only touched when a root effect restarts its loop.
    /// Returns `false` if nothing moved.
    fn tick(&mut self, dt: f32, target: &mut Transform) -> bool {
        if self.core_mut().begin_step() == Step::Restart {
            log::trace!("effect on {:?} restarting loop", self.core().target());
            self.reset(target);
        }
        self.core_mut().advance(dt)
    }

    /// Rewind the clock and restore the component's original state.
    fn reset(&mut self, target: &mut Transform) {
        self.reset_effect();
        self.apply_original_state(target);
    }

    /// Rewind the clock without touching the component.
    fn reset_effect(&mut self) {
        self.core_mut().reset();
    }

    /// Rewind the clock and drop carried drift, ready to start a fresh pass.
    fn rewind(&mut self) {
        self.core_mut().rewind();
    }

    /// Position at the end, ready to play back to the start.
    fn rewind_to_end(&mut self) {
        self.core_mut().rewind_to_end();
    }

    /// Mark as root (registered directly on a node) or nested.
    fn set_root(&mut self, root: bool) {
        self.core_mut().set_root(root);
    }

    /// Attach handle cleanup when leaving a node's handler.
    fn detach(&mut self) {
        self.core_mut().detach();
    }

    fn dispose(&mut self) {
        self.core_mut().dispose();
    }

    fn is_complete(&self) -> bool {
        self.core().is_complete()
    }

    fn is_root_effect(&self) -> bool {
        self.core().is_root()
    }

    fn iteration_time(&self) -> f32 {
        self.core().iteration_time()
    }

    /// Commit the state a finished effect rests in: back at the original
    /// for alternating effects, at the end otherwise.
    fn apply_settled_state(&self, target: &mut Transform) {
        if self.core().is_alternating() {
            self.apply_original_state(target);
        } else {
            self.apply_end_state(target);
        }
    }

    /// Removal hook, called by the owning handler after completion.
    fn on_removed(&mut self) {
        self.core_mut().notify_complete();
        if !self.core().skips_reset() {
            self.reset_effect();
        }
    }
}

/// Builder-style configuration shared by every effect.
pub trait EffectExt: Effect + Sized {
    /// Loop forever.
    fn infinite(mut self) -> Self {
        self.core_mut().set_infinite(true);
        self
    }

    /// Play back to the start after reaching the end.
    fn alternating(mut self) -> Self {
        self.core_mut().set_alternating(true);
        self
    }

    fn with_curve(mut self, curve: Curve) -> Self {
        self.core_mut().set_curve(curve);
        self
    }

    /// Called once each time the effect is removed from its node.
    fn with_on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.core_mut().set_on_complete(Box::new(callback));
        self
    }

    /// Keep the finished state after removal instead of rewinding.
    fn skip_reset(mut self) -> Self {
        self.core_mut().set_skip_reset(true);
        self
    }

    fn paused(mut self) -> Self {
        self.core_mut().pause();
        self
    }

    fn boxed(self) -> Box<dyn Effect>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<E: Effect> EffectExt for E {}
