pub mod api;
pub mod core;
pub mod effects;
pub mod error;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::types::{EffectId, NodeId};
pub use core::node::SceneNode;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::transform::{Transform, TransformMask, TransformSnapshot};
pub use error::EffectError;
pub use renderer::{Canvas, RenderBuffer, RenderInstance};

pub use effects::{
    CombinedEffect, Curve, Direction, Effect, EffectConfig, EffectCore, EffectExt,
    EffectsHandler, Motion, Pace, PositionEffect, SequenceEffect, SimpleEffect,
};
