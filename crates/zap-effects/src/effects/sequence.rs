// effects/sequence.rs
//
// Runs child effects one after another on the same node. Children are
// nested (never root), so only the sequence itself commits snapshots.
// Overshoot from a finishing child is handed to the next one in the same
// update, so a chain of effects loses no time to frame boundaries.

use crate::api::types::NodeId;
use crate::core::transform::{Transform, TransformMask, TransformSnapshot};
use super::clock::{Direction, EffectCore, Step};
use super::effect::Effect;
use super::position::PositionEffect;

/// Children played in order; in reverse order on the way back when alternating.
///
/// The sequence's own curve is not used: each child eases itself.
pub struct SequenceEffect {
    base: PositionEffect,
    effects: Vec<Box<dyn Effect>>,
    cursor: Option<usize>,
}

impl SequenceEffect {
    /// # Panics
    ///
    /// Panics if `effects` is empty.
    pub fn new(mut effects: Vec<Box<dyn Effect>>) -> Self {
        assert!(!effects.is_empty(), "sequence effect needs at least one child effect");
        let modifies = adopt(&mut effects);
        Self {
            base: PositionEffect::new(EffectCore::new(0.0, false), modifies),
            effects,
            cursor: Some(0),
        }
    }

    pub fn effects(&self) -> &[Box<dyn Effect>] {
        &self.effects
    }

    /// Index of the child currently running, `None` once all have finished.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    fn start_forward(&mut self) {
        for effect in &mut self.effects {
            effect.rewind();
        }
        self.cursor = Some(0);
    }

    fn start_backward(&mut self) {
        for effect in &mut self.effects {
            prepare_reverse(effect.as_mut());
        }
        self.cursor = self.effects.len().checked_sub(1);
    }

    fn drive(&mut self, time: f32, target: &mut Transform) {
        let backward = self.base.core().direction() == Direction::Backward;
        let mut remaining = time;
        while let Some(index) = self.cursor {
            let effect = &mut self.effects[index];
            effect.tick(remaining, target);
            if !effect.is_complete() {
                break;
            }
            remaining = effect.core().drift_time();
            self.cursor = if backward {
                index.checked_sub(1)
            } else if index + 1 < self.effects.len() {
                Some(index + 1)
            } else {
                None
            };
        }
    }
}

impl Effect for SequenceEffect {
    fn core(&self) -> &EffectCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        self.base.core_mut()
    }

    fn initialize(&mut self, node: NodeId, transform: &Transform) {
        self.base.initialize(node, transform);

        // Each child starts where the previous one rests.
        let mut scratch = *transform;
        let mut peak_time = 0.0;
        for effect in &mut self.effects {
            effect.rewind();
            effect.initialize(node, &scratch);
            effect.write_settled_snapshot(&mut scratch);
            peak_time += effect.iteration_time();
        }

        *self.base.end_mut() = TransformSnapshot::capture(&scratch);
        self.base.core_mut().set_peak_time(peak_time);
        self.cursor = Some(0);
    }

    fn modifies(&self) -> TransformMask {
        self.base.modifies()
    }

    fn tick(&mut self, dt: f32, target: &mut Transform) -> bool {
        let direction = self.base.core().direction();
        if self.base.core_mut().begin_step() == Step::Restart {
            log::trace!("sequence on {:?} restarting loop", self.base.core().target());
            self.reset(target);
        } else if direction == Direction::Forward && self.base.core().direction() == Direction::Backward {
            self.start_backward();
        }

        let carried = self.base.core().drift_time();
        if !self.base.core_mut().advance(dt) {
            return false;
        }
        self.drive(dt + carried, target);
        true
    }

    /// Write every child up to the running one, in order. Earlier children
    /// rest at the pose the running one starts from; later ones are either
    /// untouched (forward) or back at that pose (backward).
    fn apply_progress(&mut self, target: &mut Transform) {
        let last = match self.cursor {
            Some(index) => index,
            None if self.base.core().direction() == Direction::Backward => 0,
            None => self.effects.len() - 1,
        };
        for effect in &mut self.effects[..=last] {
            effect.apply_progress(target);
        }
    }

    fn apply_original_state(&self, target: &mut Transform) {
        self.base.apply_original_state(target);
    }

    fn apply_end_state(&self, target: &mut Transform) {
        self.base.apply_end_state(target);
    }

    fn write_end_snapshot(&self, target: &mut Transform) {
        self.base.write_end_snapshot(target);
    }

    fn reset_effect(&mut self) {
        self.base.core_mut().reset();
        self.start_forward();
    }

    fn rewind(&mut self) {
        self.base.core_mut().rewind();
        self.start_forward();
    }

    fn rewind_to_end(&mut self) {
        self.base.core_mut().rewind_to_end();
        self.start_backward();
    }

    fn detach(&mut self) {
        self.base.core_mut().detach();
        for effect in &mut self.effects {
            effect.detach();
        }
    }
}

/// Mark children as nested and collect the fields they touch.
pub(super) fn adopt(effects: &mut [Box<dyn Effect>]) -> TransformMask {
    effects.iter_mut().fold(TransformMask::NONE, |mask, effect| {
        effect.set_root(false);
        mask.union(effect.modifies())
    })
}

/// Ready a child to replay its pass backwards. Alternating children already
/// end where they start, so they replay their own round trip instead.
pub(super) fn prepare_reverse(effect: &mut dyn Effect) {
    effect.rewind();
    if !effect.core().is_alternating() {
        effect.rewind_to_end();
    }
}
