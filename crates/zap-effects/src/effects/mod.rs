// effects/mod.rs
//
// Time-driven transform effects.
//
// Layering: `clock` is the progress state machine, `effect` the trait every
// effect implements, `position` the snapshot state shared by transform
// effects. `simple`, `sequence` and `combined` are the concrete effects;
// `handler` owns a node's effects and `config` builds them from data.

pub mod clock;
pub mod combined;
pub mod config;
pub mod curve;
pub mod effect;
pub mod handler;
pub mod position;
pub mod sequence;
pub mod simple;

pub use clock::{Direction, EffectCore, OnComplete, Step};
pub use combined::CombinedEffect;
pub use config::{EffectConfig, MotionConfig};
pub use curve::Curve;
pub use effect::{Effect, EffectExt};
pub use handler::EffectsHandler;
pub use position::PositionEffect;
pub use sequence::SequenceEffect;
pub use simple::{Motion, Pace, SimpleEffect};
