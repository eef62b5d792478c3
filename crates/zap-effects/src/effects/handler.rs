// effects/handler.rs
//
// Per-node effect collection. Attaches effects as root, drives them each
// frame and retires the ones that finished.
//
// Usage:
//   let mut effects = EffectsHandler::new();
//   let id = effects.add(SimpleEffect::move_by(offset, Pace::Duration(0.5)).boxed(), node_id, &transform);
//   effects.update(dt, &mut transform);  // Advances every effect, writes the transform

use crate::api::types::{EffectId, NodeId};
use crate::core::transform::Transform;
use super::effect::Effect;

/// Owns the effects attached directly to one node.
#[derive(Default)]
pub struct EffectsHandler {
    effects: Vec<(EffectId, Box<dyn Effect>)>,
    next_id: u32,
    /// Effects retired by the latest update, kept until the next one.
    finished: Vec<(EffectId, Box<dyn Effect>)>,
}

impl std::fmt::Debug for EffectsHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsHandler")
            .field("active", &self.effects.len())
            .field("finished", &self.finished.len())
            .finish()
    }
}

impl EffectsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize `effect` against `transform`, register it as a root effect
    /// of `node`, and return a handle for later control.
    pub fn add(&mut self, mut effect: Box<dyn Effect>, node: NodeId, transform: &Transform) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;

        effect.initialize(node, transform);
        effect.set_root(true);
        log::debug!(
            "{:?}: attached effect {:?} ({:.3}s per iteration)",
            node,
            id,
            effect.iteration_time()
        );
        self.effects.push((id, effect));
        id
    }

    /// Dispose an effect. It is retired on the next update.
    pub fn remove(&mut self, id: EffectId) -> bool {
        match self.get_mut(id) {
            Some(effect) => {
                effect.dispose();
                true
            }
            None => false,
        }
    }

    /// Dispose every effect. They are retired on the next update.
    pub fn clear(&mut self) {
        for (_, effect) in &mut self.effects {
            effect.dispose();
        }
    }

    pub fn pause(&mut self, id: EffectId) {
        if let Some(effect) = self.get_mut(id) {
            effect.core_mut().pause();
        }
    }

    pub fn resume(&mut self, id: EffectId) {
        if let Some(effect) = self.get_mut(id) {
            effect.core_mut().resume();
        }
    }

    pub fn get(&self, id: EffectId) -> Option<&dyn Effect> {
        self.effects
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e.as_ref())
    }

    pub fn get_mut(&mut self, id: EffectId) -> Option<&mut (dyn Effect + 'static)> {
        self.effects
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e.as_mut())
    }

    /// Attached effects, including ones finished this frame but not yet retired.
    pub fn iter(&self) -> impl Iterator<Item = (EffectId, &dyn Effect)> {
        self.effects.iter().map(|(id, e)| (*id, e.as_ref()))
    }

    /// Retire finished effects from the previous frame, then advance the rest.
    ///
    /// An effect that finishes during this update (rather than being
    /// disposed) is settled onto its exact final state.
    pub fn update(&mut self, dt: f32, target: &mut Transform) {
        self.finished.clear();
        self.retire_complete();

        for (id, effect) in &mut self.effects {
            if effect.core().is_paused() {
                continue;
            }
            let was_complete = effect.is_complete();
            effect.update(dt, target);
            if !was_complete && effect.is_complete() {
                log::debug!("effect {:?} on {:?} finished", id, effect.core().target());
                effect.apply_settled_state(target);
            }
        }
    }

    fn retire_complete(&mut self) {
        let mut index = 0;
        while index < self.effects.len() {
            if !self.effects[index].1.is_complete() {
                index += 1;
                continue;
            }
            let (id, mut effect) = self.effects.remove(index);
            log::debug!("retiring effect {:?} from {:?}", id, effect.core().target());
            effect.on_removed();
            effect.detach();
            self.finished.push((id, effect));
        }
    }

    /// Take the effects retired by the latest update, for example to attach
    /// them again.
    pub fn drain_finished(&mut self) -> impl Iterator<Item = (EffectId, Box<dyn Effect>)> + '_ {
        self.finished.drain(..)
    }

    /// Number of attached effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
