//! Container build configuration.

use serde::{Deserialize, Serialize};

/// Container build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Path to the build recipe
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    /// Build context directory
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_dockerfile() -> String {
    "Dockerfile".to_string()
}

fn default_context() -> String {
    ".".to_string()
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            dockerfile: default_dockerfile(),
            context: default_context(),
        }
    }
}
