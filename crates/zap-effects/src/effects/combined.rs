// effects/combined.rs
//
// Runs child effects concurrently on the same node. Every child starts from
// the same original state; the combined effect lasts as long as its longest
// child.

use crate::api::types::NodeId;
use crate::core::transform::{Transform, TransformMask, TransformSnapshot};
use super::clock::{Direction, EffectCore, Step};
use super::effect::Effect;
use super::position::PositionEffect;
use super::sequence::{adopt, prepare_reverse};

/// Children played side by side.
///
/// On the way back (when alternating) every child reverses at once, so
/// shorter children reach their start before longer ones do.
pub struct CombinedEffect {
    base: PositionEffect,
    effects: Vec<Box<dyn Effect>>,
}

impl CombinedEffect {
    /// # Panics
    ///
    /// Panics if `effects` is empty.
    pub fn new(mut effects: Vec<Box<dyn Effect>>) -> Self {
        assert!(!effects.is_empty(), "combined effect needs at least one child effect");
        let modifies = adopt(&mut effects);
        Self {
            base: PositionEffect::new(EffectCore::new(0.0, false), modifies),
            effects,
        }
    }

    pub fn effects(&self) -> &[Box<dyn Effect>] {
        &self.effects
    }

    fn drive(&mut self, time: f32, target: &mut Transform) {
        for effect in self.effects.iter_mut().filter(|e| !e.is_complete()) {
            effect.tick(time, target);
        }
    }
}

impl Effect for CombinedEffect {
    fn core(&self) -> &EffectCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        self.base.core_mut()
    }

    fn initialize(&mut self, node: NodeId, transform: &Transform) {
        self.base.initialize(node, transform);

        let mut end = *transform;
        let mut peak_time: f32 = 0.0;
        for effect in &mut self.effects {
            effect.rewind();
            effect.initialize(node, transform);
            effect.write_settled_snapshot(&mut end);
            peak_time = peak_time.max(effect.iteration_time());
        }

        *self.base.end_mut() = TransformSnapshot::capture(&end);
        self.base.core_mut().set_peak_time(peak_time);
    }

    fn modifies(&self) -> TransformMask {
        self.base.modifies()
    }

    fn tick(&mut self, dt: f32, target: &mut Transform) -> bool {
        let direction = self.base.core().direction();
        if self.base.core_mut().begin_step() == Step::Restart {
            log::trace!("combined effect on {:?} restarting loop", self.base.core().target());
            self.reset(target);
        } else if direction == Direction::Forward && self.base.core().direction() == Direction::Backward {
            for effect in &mut self.effects {
                prepare_reverse(effect.as_mut());
            }
        }

        let carried = self.base.core().drift_time();
        if !self.base.core_mut().advance(dt) {
            return false;
        }
        self.drive(dt + carried, target);
        true
    }

    fn apply_progress(&mut self, target: &mut Transform) {
        for effect in &mut self.effects {
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
        for effect in &mut self.effects {
            effect.rewind();
        }
    }

    fn rewind(&mut self) {
        self.base.core_mut().rewind();
        for effect in &mut self.effects {
            effect.rewind();
        }
    }

    fn rewind_to_end(&mut self) {
        self.base.core_mut().rewind_to_end();
        for effect in &mut self.effects {
            prepare_reverse(effect.as_mut());
        }
    }

    fn detach(&mut self) {
        self.base.core_mut().detach();
        for effect in &mut self.effects {
            effect.detach();
        }
    }
}
