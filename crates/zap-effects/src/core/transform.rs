// core/transform.rs
//
// Transform state of a scene node, plus the snapshot/mask types effects use
// to capture and restore it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The four mutable transform fields of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent node.
    pub position: Vec2,
    /// Rotation in radians relative to the parent node.
    pub angle: f32,
    /// Unscaled size in game units.
    pub size: Vec2,
    /// Scale multiplier relative to the parent node.
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            size: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Resolve `self` (a local transform) into the space `parent` lives in.
    ///
    /// The local offset is rotated by the parent's angle, scaled by the
    /// parent's scale, then translated by the parent's position.
    pub fn compose(&self, parent: &Transform) -> Transform {
        let (sin_r, cos_r) = parent.angle.sin_cos();
        let rotated = Vec2::new(
            self.position.x * cos_r - self.position.y * sin_r,
            self.position.x * sin_r + self.position.y * cos_r,
        );
        Transform {
            position: parent.position + rotated * parent.scale,
            angle: parent.angle + self.angle,
            size: self.size,
            scale: parent.scale * self.scale,
        }
    }

    /// Rendered extent: size multiplied by scale.
    pub fn scaled_size(&self) -> Vec2 {
        self.size * self.scale
    }
}

/// Which transform fields an effect is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformMask {
    pub position: bool,
    pub angle: bool,
    pub size: bool,
    pub scale: bool,
}

impl TransformMask {
    pub const NONE: Self = Self { position: false, angle: false, size: false, scale: false };
    pub const POSITION: Self = Self { position: true, ..Self::NONE };
    pub const ANGLE: Self = Self { angle: true, ..Self::NONE };
    pub const SIZE: Self = Self { size: true, ..Self::NONE };
    pub const SCALE: Self = Self { scale: true, ..Self::NONE };
    pub const ALL: Self = Self { position: true, angle: true, size: true, scale: true };

    /// Fields modified by either mask.
    pub fn union(self, other: Self) -> Self {
        Self {
            position: self.position || other.position,
            angle: self.angle || other.angle,
            size: self.size || other.size,
            scale: self.scale || other.scale,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// A possibly-partial copy of a node's transform.
///
/// Empty until an effect is initialized against a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformSnapshot {
    pub position: Option<Vec2>,
    pub angle: Option<f32>,
    pub size: Option<Vec2>,
    pub scale: Option<Vec2>,
}

impl TransformSnapshot {
    /// Capture every field of `transform`.
    pub fn capture(transform: &Transform) -> Self {
        Self {
            position: Some(transform.position),
            angle: Some(transform.angle),
            size: Some(transform.size),
            scale: Some(transform.scale),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.angle.is_none() && self.size.is_none() && self.scale.is_none()
    }

    /// Copy the fields named by `mask` into `target`.
    ///
    /// # Panics
    ///
    /// Panics if a field in `mask` has no captured value. That means the
    /// effect is being applied before it was initialized.
    pub fn write(&self, mask: TransformMask, target: &mut Transform) {
        if mask.position {
            target.position = require(self.position, "position");
        }
        if mask.angle {
            target.angle = require(self.angle, "angle");
        }
        if mask.size {
            target.size = require(self.size, "size");
        }
        if mask.scale {
            target.scale = require(self.scale, "scale");
        }
    }

    /// Write `from + (to - from) * t` for every masked field into `target`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`TransformSnapshot::write`], on either endpoint.
    pub fn interpolate(from: &Self, to: &Self, t: f32, mask: TransformMask, target: &mut Transform) {
        if mask.position {
            let a = require(from.position, "position");
            target.position = a + (require(to.position, "position") - a) * t;
        }
        if mask.angle {
            let a = require(from.angle, "angle");
            target.angle = a + (require(to.angle, "angle") - a) * t;
        }
        if mask.size {
            let a = require(from.size, "size");
            target.size = a + (require(to.size, "size") - a) * t;
        }
        if mask.scale {
            let a = require(from.scale, "scale");
            target.scale = a + (require(to.scale, "scale") - a) * t;
        }
    }
}

#[inline]
fn require<T>(value: Option<T>, field: &str) -> T {
    match value {
        Some(v) => v,
        None => panic!("effect modifies `{field}` but no {field} snapshot was taken; initialize the effect before applying it"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_rotates_and_scales_offset() {
        let parent = Transform::new()
            .with_position(Vec2::new(100.0, 100.0))
            .with_angle(std::f32::consts::FRAC_PI_2)
            .with_scale(Vec2::splat(2.0));
        let child = Transform::new().with_position(Vec2::new(10.0, 0.0));

        let world = child.compose(&parent);
        assert!((world.position.x - 100.0).abs() < 0.001);
        assert!((world.position.y - 120.0).abs() < 0.001);
        assert_eq!(world.scale, Vec2::splat(2.0));
    }

    #[test]
    fn write_only_touches_masked_fields() {
        let snapshot = TransformSnapshot::capture(
            &Transform::new().with_position(Vec2::new(5.0, 5.0)).with_angle(1.0),
        );
        let mut target = Transform::new();
        snapshot.write(TransformMask::POSITION, &mut target);
        assert_eq!(target.position, Vec2::new(5.0, 5.0));
        assert_eq!(target.angle, 0.0);
    }

    #[test]
    #[should_panic(expected = "no angle snapshot")]
    fn write_unset_field_panics() {
        let snapshot = TransformSnapshot::default();
        snapshot.write(TransformMask::ANGLE, &mut Transform::new());
    }

    #[test]
    fn interpolate_halfway() {
        let from = TransformSnapshot::capture(&Transform::new());
        let to = TransformSnapshot::capture(&Transform::new().with_position(Vec2::new(10.0, 0.0)));
        let mut target = Transform::new();
        TransformSnapshot::interpolate(&from, &to, 0.5, TransformMask::POSITION, &mut target);
        assert_eq!(target.position, Vec2::new(5.0, 0.0));
    }
}
