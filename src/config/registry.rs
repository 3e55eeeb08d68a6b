//! Registry configuration for container images.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Registry configuration for container images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry-qualified repository (e.g. "registry.example.com/team/app")
    #[serde(default)]
    pub repository: String,

    /// Cloud region the registry lives in (for CLI authentication)
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            region: default_region(),
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.is_empty() {
            return Err(ConfigError::MissingField {
                field: "registry.repository".to_string(),
            });
        }
        if !self.repository.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "registry.repository".to_string(),
                value: format!("{} (expected host/name)", self.repository),
            });
        }
        if self.region.is_empty() {
            return Err(ConfigError::MissingField {
                field: "registry.region".to_string(),
            });
        }
        Ok(())
    }
}
