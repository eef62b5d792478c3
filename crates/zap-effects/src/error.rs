//! Error types for effect construction and configuration loading.

use thiserror::Error;

/// Configuration errors surfaced while building effects.
///
/// Invariant violations after construction (for example writing a transform
/// field with no snapshot) are programming errors and panic instead.
#[derive(Error, Debug)]
pub enum EffectError {
    /// Both a duration and a speed were supplied.
    #[error("effect pace is ambiguous: got duration {duration} and speed {speed}")]
    ConflictingPace { duration: f32, speed: f32 },

    /// Neither a duration nor a speed was supplied.
    #[error("effect pace is missing: expected exactly one of `duration` or `speed`")]
    MissingPace,

    /// Duration is negative or speed is not positive, or either is not finite.
    #[error("invalid {field} {value}: durations must be finite and non-negative, speeds finite and positive")]
    InvalidPace { field: &'static str, value: f32 },

    /// Composite effects derive their timing from their children.
    #[error("composite effects take their pace from their children; remove `duration`/`speed`")]
    PaceOnComposite,

    /// A sequence or combined effect was given no children.
    #[error("{kind} effect needs at least one child effect")]
    EmptyComposite { kind: &'static str },

    /// The configuration document could not be parsed.
    #[error("invalid effect configuration: {0}")]
    Json(#[from] serde_json::Error),
}
