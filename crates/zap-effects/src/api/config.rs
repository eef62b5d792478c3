use serde::{Deserialize, Serialize};

/// Configuration for a [`Scene`](crate::core::scene::Scene), usually loaded
/// once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Step effects with this fixed dt (seconds). `None` steps once per
    /// frame with the frame's own dt.
    pub fixed_dt: Option<f32>,
    /// Maximum fixed steps per frame before time is dropped (default: 10).
    pub max_steps_per_frame: u32,
    /// Spawned nodes draw their debug bounds.
    pub debug: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: None,
            max_steps_per_frame: 10,
            debug: false,
        }
    }
}

impl SceneConfig {
    /// Parse from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
