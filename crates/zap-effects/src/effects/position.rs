// effects/position.rs
//
// State shared by every effect that mutates a node's transform: the
// snapshots taken at attach time and the root-gated writer.

use crate::api::types::NodeId;
use crate::core::transform::{Transform, TransformMask, TransformSnapshot};
use super::clock::EffectCore;

/// Clock plus original/end snapshots for a transform effect.
///
/// Concrete effects embed this and fill in [`PositionEffect::end_mut`]
/// from their own parameters after [`PositionEffect::initialize`].
#[derive(Debug)]
pub struct PositionEffect {
    core: EffectCore,
    modifies: TransformMask,
    original: TransformSnapshot,
    end: TransformSnapshot,
}

impl PositionEffect {
    pub fn new(core: EffectCore, modifies: TransformMask) -> Self {
        Self {
            core,
            modifies,
            original: TransformSnapshot::default(),
            end: TransformSnapshot::default(),
        }
    }

    /// Attach and snapshot `transform` as both the original and the
    /// provisional end state.
    pub fn initialize(&mut self, node: NodeId, transform: &Transform) {
        self.core.attach(node);
        self.original = TransformSnapshot::capture(transform);
        self.end = self.original;
    }

    pub fn core(&self) -> &EffectCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    pub fn modifies(&self) -> TransformMask {
        self.modifies
    }

    pub fn original(&self) -> &TransformSnapshot {
        &self.original
    }

    pub fn end(&self) -> &TransformSnapshot {
        &self.end
    }

    pub fn end_mut(&mut self) -> &mut TransformSnapshot {
        &mut self.end
    }

    pub fn apply_original_state(&self, target: &mut Transform) {
        self.commit(&self.original, target);
    }

    pub fn apply_end_state(&self, target: &mut Transform) {
        self.commit(&self.end, target);
    }

    /// Ungated end write, for chaining on scratch transforms.
    pub fn write_end_snapshot(&self, target: &mut Transform) {
        self.end.write(self.modifies, target);
    }

    /// Interpolate original → end at the current eased progress.
    pub fn apply_progress(&self, target: &mut Transform) {
        TransformSnapshot::interpolate(
            &self.original,
            &self.end,
            self.core.eased_progress(),
            self.modifies,
            target,
        );
    }

    // Nested effects never write snapshots; their composite does.
    fn commit(&self, snapshot: &TransformSnapshot, target: &mut Transform) {
        if !self.core.is_root() {
            return;
        }
        snapshot.write(self.modifies, target);
    }
}
