//! Pipeline configuration
//!
//! Configuration comes from three places, merged in order:
//!
//! 1. Defaults baked into the config types (serde defaults)
//! 2. An optional `shipit.yaml` project file
//! 3. CLI flags / environment variables (clap `env` fallbacks)
//!
//! Everything is validated once at pipeline entry; stages never read
//! the environment themselves.

mod docker;
mod notify;
mod registry;

// Re-export all public types
pub use docker::DockerConfig;
pub use notify::NotifyConfig;
pub use registry::RegistryConfig;

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default name of the version file at the repo root
pub const DEFAULT_VERSION_FILE: &str = "version";

/// Fully merged and validated pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub docker: DockerConfig,

    /// Path to the file holding the version string
    #[serde(default = "default_version_file")]
    pub version_file: String,
}

fn default_version_file() -> String {
    DEFAULT_VERSION_FILE.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            notify: NotifyConfig::default(),
            docker: DockerConfig::default(),
            version_file: default_version_file(),
        }
    }
}

impl PipelineConfig {
    /// Load `shipit.yaml` from the given path, or defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Validate the merged configuration before any stage runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        self.notify.validate()?;
        if self.version_file.is_empty() {
            return Err(ConfigError::MissingField {
                field: "version_file".to_string(),
            });
        }
        Ok(())
    }
}

/// Read and validate the version string from the version file.
///
/// The file holds a single `MAJOR.MINOR.PATCH` line; surrounding
/// whitespace is tolerated.
pub fn read_version(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::VersionFileNotFound {
        path: path.display().to_string(),
    })?;
    let version = raw.trim().to_string();

    let pattern = Regex::new(r"^\d+\.\d+\.\d+$").expect("valid version regex");
    if !pattern.is_match(&version) {
        return Err(ConfigError::InvalidVersion { version });
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = PipelineConfig::load(Path::new("/nonexistent/shipit.yaml")).unwrap();
        assert_eq!(config.version_file, "version");
        assert_eq!(config.docker.dockerfile, "Dockerfile");
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r##"
registry:
  repository: registry.example.com/team/app
  region: eu-west-1
notify:
  webhook_url: https://chat.example.com/hooks/abc
  channel: "#releases"
docker:
  dockerfile: docker/Dockerfile
"##;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.registry.repository, "registry.example.com/team/app");
        assert_eq!(config.registry.region, "eu-west-1");
        assert_eq!(config.notify.channel, "#releases");
        assert_eq!(config.docker.dockerfile, "docker/Dockerfile");
        // Unspecified sections keep their defaults
        assert_eq!(config.docker.context, ".");
        assert_eq!(config.version_file, "version");
    }

    #[test]
    fn test_read_version_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.2.3").unwrap();
        assert_eq!(read_version(file.path()).unwrap(), "1.2.3");
    }

    #[test]
    fn test_read_version_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not-a-version").unwrap();
        assert!(matches!(
            read_version(file.path()),
            Err(ConfigError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_read_version_missing_file() {
        assert!(matches!(
            read_version(Path::new("/nonexistent/version")),
            Err(ConfigError::VersionFileNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_requires_repository() {
        let config = PipelineConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }
}
