// effects/config.rs
//
// Declarative effect descriptions, loaded from JSON alongside other game
// data and turned into boxed effects.
//
// Example:
//   {
//     "kind": "sequence",
//     "alternating": true,
//     "effects": [
//       { "kind": "move_by", "by": [10, 0], "duration": 0.5, "curve": "quad_out" },
//       { "kind": "rotate_by", "angle": 3.14, "speed": 6.28 }
//     ]
//   }

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use super::combined::CombinedEffect;
use super::curve::Curve;
use super::effect::{Effect, EffectExt};
use super::sequence::SequenceEffect;
use super::simple::{Motion, Pace, SimpleEffect};

/// What the described effect does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionConfig {
    MoveTo { to: Vec2 },
    MoveBy { by: Vec2 },
    RotateTo { angle: f32 },
    RotateBy { angle: f32 },
    ResizeTo { size: Vec2 },
    ResizeBy { by: Vec2 },
    ScaleTo { scale: Vec2 },
    ScaleBy { factor: Vec2 },
    Sequence { effects: Vec<EffectConfig> },
    Combined { effects: Vec<EffectConfig> },
}

/// A single effect, or a composite of effects, as written in data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectConfig {
    #[serde(flatten)]
    pub motion: MotionConfig,
    /// Seconds per pass. Leaf effects need exactly one of `duration`/`speed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    /// Units per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default)]
    pub curve: Curve,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default)]
    pub alternating: bool,
    #[serde(default)]
    pub skip_reset: bool,
}

impl EffectConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the described effect, validating pace and composite shape.
    pub fn build(&self) -> Result<Box<dyn Effect>, EffectError> {
        let mut effect = match &self.motion {
            MotionConfig::Sequence { effects } => {
                self.reject_pace()?;
                SequenceEffect::new(build_children("sequence", effects)?).boxed()
            }
            MotionConfig::Combined { effects } => {
                self.reject_pace()?;
                CombinedEffect::new(build_children("combined", effects)?).boxed()
            }
            leaf => {
                let pace = Pace::from_parts(self.duration, self.speed)?;
                SimpleEffect::new(leaf_motion(leaf), pace).boxed()
            }
        };

        let core = effect.core_mut();
        core.set_curve(self.curve);
        core.set_infinite(self.infinite);
        core.set_alternating(self.alternating);
        core.set_skip_reset(self.skip_reset);
        Ok(effect)
    }

    fn reject_pace(&self) -> Result<(), EffectError> {
        if self.duration.is_some() || self.speed.is_some() {
            return Err(EffectError::PaceOnComposite);
        }
        Ok(())
    }
}

fn build_children(kind: &'static str, configs: &[EffectConfig]) -> Result<Vec<Box<dyn Effect>>, EffectError> {
    if configs.is_empty() {
        return Err(EffectError::EmptyComposite { kind });
    }
    configs.iter().map(EffectConfig::build).collect()
}

fn leaf_motion(config: &MotionConfig) -> Motion {
    match *config {
        MotionConfig::MoveTo { to } => Motion::MoveTo(to),
        MotionConfig::MoveBy { by } => Motion::MoveBy(by),
        MotionConfig::RotateTo { angle } => Motion::RotateTo(angle),
        MotionConfig::RotateBy { angle } => Motion::RotateBy(angle),
        MotionConfig::ResizeTo { size } => Motion::ResizeTo(size),
        MotionConfig::ResizeBy { by } => Motion::ResizeBy(by),
        MotionConfig::ScaleTo { scale } => Motion::ScaleTo(scale),
        MotionConfig::ScaleBy { factor } => Motion::ScaleBy(factor),
        MotionConfig::Sequence { .. } | MotionConfig::Combined { .. } => {
            unreachable!("composite configs are built by EffectConfig::build")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use crate::core::transform::Transform;

    #[test]
    fn builds_leaf_effect() {
        let config = EffectConfig::from_json(
            r#"{ "kind": "move_by", "by": [10, 0], "duration": 2.0, "alternating": true }"#,
        )
        .unwrap();
        let mut effect = config.build().unwrap();
        let mut transform = Transform::new();
        effect.initialize(NodeId(1), &transform);

        assert!(effect.core().is_alternating());
        assert!(effect.core().is_relative());
        effect.update(1.0, &mut transform);
        assert_eq!(transform.position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn speed_based_leaf_resolves_on_initialize() {
        let config =
            EffectConfig::from_json(r#"{ "kind": "move_to", "to": [0, 20], "speed": 10 }"#).unwrap();
        let mut effect = config.build().unwrap();
        effect.initialize(NodeId(1), &Transform::new());
        assert!((effect.core().peak_time() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn builds_nested_composites() {
        let config = EffectConfig::from_json(
            r#"{
                "kind": "sequence",
                "infinite": true,
                "effects": [
                    { "kind": "rotate_by", "angle": 1.0, "duration": 1.0, "curve": "sine_in_out" },
                    { "kind": "combined", "effects": [
                        { "kind": "scale_by", "factor": [2, 2], "duration": 0.5 },
                        { "kind": "resize_to", "size": [4, 4], "duration": 1.5 }
                    ]}
                ]
            }"#,
        )
        .unwrap();
        let mut effect = config.build().unwrap();
        effect.initialize(NodeId(1), &Transform::new());
        assert!(effect.core().is_infinite());
        assert!((effect.core().peak_time() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn rejects_both_duration_and_speed() {
        let config = EffectConfig::from_json(
            r#"{ "kind": "rotate_to", "angle": 1.0, "duration": 1.0, "speed": 2.0 }"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(EffectError::ConflictingPace { .. })));
    }

    #[test]
    fn rejects_missing_pace() {
        let config = EffectConfig::from_json(r#"{ "kind": "scale_to", "scale": [1, 1] }"#).unwrap();
        assert!(matches!(config.build(), Err(EffectError::MissingPace)));
    }

    #[test]
    fn rejects_pace_on_composite() {
        let config = EffectConfig::from_json(
            r#"{ "kind": "combined", "duration": 1.0, "effects": [
                { "kind": "rotate_by", "angle": 1.0, "duration": 1.0 }
            ]}"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(EffectError::PaceOnComposite)));
    }

    #[test]
    fn rejects_empty_composite() {
        let config = EffectConfig::from_json(r#"{ "kind": "sequence", "effects": [] }"#).unwrap();
        assert!(matches!(
            config.build(),
            Err(EffectError::EmptyComposite { kind: "sequence" })
        ));
    }

    #[test]
    fn nested_errors_surface() {
        let config = EffectConfig::from_json(
            r#"{ "kind": "sequence", "effects": [ { "kind": "move_by", "by": [1, 1] } ] }"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(EffectError::MissingPace)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            EffectConfig::from_json(r#"{ "kind": "teleport" }"#),
            Err(EffectError::Json(_))
        ));
    }
}
