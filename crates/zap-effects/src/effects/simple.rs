// effects/simple.rs
//
// Leaf effects: move, rotate, resize and scale a node, timed either by a
// fixed duration or by a speed.
//
// Usage:
//   let effect = SimpleEffect::move_by(Vec2::new(10.0, 0.0), Pace::Duration(2.0))
//       .with_curve(Curve::QuadOut)
//       .alternating();
//   node.add_effect(effect);

use glam::Vec2;

use crate::api::types::NodeId;
use crate::core::transform::{Transform, TransformMask, TransformSnapshot};
use crate::error::EffectError;
use super::clock::EffectCore;
use super::effect::Effect;
use super::position::PositionEffect;

/// How long one pass of a leaf effect takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pace {
    /// Seconds per pass.
    Duration(f32),
    /// Units per second; the pass time follows from the distance travelled.
    Speed(f32),
}

impl Pace {
    /// Build a pace from optional config fields. Exactly one must be set.
    pub fn from_parts(duration: Option<f32>, speed: Option<f32>) -> Result<Self, EffectError> {
        let pace = match (duration, speed) {
            (Some(duration), Some(speed)) => return Err(EffectError::ConflictingPace { duration, speed }),
            (None, None) => return Err(EffectError::MissingPace),
            (Some(duration), None) => Pace::Duration(duration),
            (None, Some(speed)) => Pace::Speed(speed),
        };
        pace.validate()?;
        Ok(pace)
    }

    /// Durations must be finite and non-negative, speeds finite and positive.
    pub fn validate(self) -> Result<(), EffectError> {
        match self {
            Pace::Duration(d) if !d.is_finite() || d < 0.0 => {
                Err(EffectError::InvalidPace { field: "duration", value: d })
            }
            Pace::Speed(s) if !s.is_finite() || s <= 0.0 => {
                Err(EffectError::InvalidPace { field: "speed", value: s })
            }
            _ => Ok(()),
        }
    }
}

/// What a leaf effect does to its node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    MoveTo(Vec2),
    MoveBy(Vec2),
    RotateTo(f32),
    RotateBy(f32),
    ResizeTo(Vec2),
    ResizeBy(Vec2),
    ScaleTo(Vec2),
    /// Multiplies the original scale.
    ScaleBy(Vec2),
}

impl Motion {
    pub fn mask(self) -> TransformMask {
        match self {
            Motion::MoveTo(_) | Motion::MoveBy(_) => TransformMask::POSITION,
            Motion::RotateTo(_) | Motion::RotateBy(_) => TransformMask::ANGLE,
            Motion::ResizeTo(_) | Motion::ResizeBy(_) => TransformMask::SIZE,
            Motion::ScaleTo(_) | Motion::ScaleBy(_) => TransformMask::SCALE,
        }
    }

    /// Whether the parameter is an offset from the original state.
    pub fn is_relative(self) -> bool {
        matches!(
            self,
            Motion::MoveBy(_) | Motion::RotateBy(_) | Motion::ResizeBy(_) | Motion::ScaleBy(_)
        )
    }

    fn resolve_end(self, original: &Transform, end: &mut TransformSnapshot) {
        match self {
            Motion::MoveTo(p) => end.position = Some(p),
            Motion::MoveBy(d) => end.position = Some(original.position + d),
            Motion::RotateTo(a) => end.angle = Some(a),
            Motion::RotateBy(d) => end.angle = Some(original.angle + d),
            Motion::ResizeTo(s) => end.size = Some(s),
            Motion::ResizeBy(d) => end.size = Some(original.size + d),
            Motion::ScaleTo(s) => end.scale = Some(s),
            Motion::ScaleBy(f) => end.scale = Some(original.scale * f),
        }
    }

    fn distance(self, original: &TransformSnapshot, end: &TransformSnapshot) -> f32 {
        fn span(a: Option<Vec2>, b: Option<Vec2>) -> f32 {
            match (a, b) {
                (Some(a), Some(b)) => a.distance(b),
                _ => 0.0,
            }
        }
        match self {
            Motion::MoveTo(_) | Motion::MoveBy(_) => span(original.position, end.position),
            Motion::RotateTo(_) | Motion::RotateBy(_) => match (original.angle, end.angle) {
                (Some(a), Some(b)) => (b - a).abs(),
                _ => 0.0,
            },
            Motion::ResizeTo(_) | Motion::ResizeBy(_) => span(original.size, end.size),
            Motion::ScaleTo(_) | Motion::ScaleBy(_) => span(original.scale, end.scale),
        }
    }
}

/// A single-field transform effect.
#[derive(Debug)]
pub struct SimpleEffect {
    base: PositionEffect,
    motion: Motion,
    pace: Pace,
}

impl SimpleEffect {
    /// # Panics
    ///
    /// Panics if `pace` is out of range (see [`Pace::validate`]). Use
    /// [`Pace::from_parts`] to validate untrusted input first.
    pub fn new(motion: Motion, pace: Pace) -> Self {
        if let Err(err) = pace.validate() {
            panic!("{err}");
        }
        let peak_time = match pace {
            Pace::Duration(d) => d,
            // Resolved once the end state is known.
            Pace::Speed(_) => 0.0,
        };
        Self {
            base: PositionEffect::new(EffectCore::new(peak_time, motion.is_relative()), motion.mask()),
            motion,
            pace,
        }
    }

    pub fn move_to(destination: Vec2, pace: Pace) -> Self {
        Self::new(Motion::MoveTo(destination), pace)
    }

    pub fn move_by(offset: Vec2, pace: Pace) -> Self {
        Self::new(Motion::MoveBy(offset), pace)
    }

    pub fn rotate_to(angle: f32, pace: Pace) -> Self {
        Self::new(Motion::RotateTo(angle), pace)
    }

    pub fn rotate_by(angle: f32, pace: Pace) -> Self {
        Self::new(Motion::RotateBy(angle), pace)
    }

    pub fn resize_to(size: Vec2, pace: Pace) -> Self {
        Self::new(Motion::ResizeTo(size), pace)
    }

    pub fn resize_by(delta: Vec2, pace: Pace) -> Self {
        Self::new(Motion::ResizeBy(delta), pace)
    }

    pub fn scale_to(scale: Vec2, pace: Pace) -> Self {
        Self::new(Motion::ScaleTo(scale), pace)
    }

    pub fn scale_by(factor: Vec2, pace: Pace) -> Self {
        Self::new(Motion::ScaleBy(factor), pace)
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn base(&self) -> &PositionEffect {
        &self.base
    }
}

impl Effect for SimpleEffect {
    fn core(&self) -> &EffectCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        self.base.core_mut()
    }

    fn initialize(&mut self, node: NodeId, transform: &Transform) {
        self.base.initialize(node, transform);
        self.motion.resolve_end(transform, self.base.end_mut());

        if let Pace::Speed(speed) = self.pace {
            let distance = self.motion.distance(self.base.original(), self.base.end());
            if distance == 0.0 {
                log::warn!("{:?} on {:?} has nothing to travel; completing immediately", self.motion, node);
            }
            self.base.core_mut().set_peak_time(distance / speed);
        }
    }

    fn modifies(&self) -> TransformMask {
        self.base.modifies()
    }

    fn apply_progress(&mut self, target: &mut Transform) {
        self.base.apply_progress(target);
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
}
