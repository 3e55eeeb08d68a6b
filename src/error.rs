//! Centralized error types for shipit
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for pipeline operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Container engine error: {0}")]
    Docker(#[from] DockerError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error(
        "Unsupported branch '{branch}': only 'main' and 'dev' produce an image reference"
    )]
    UnsupportedBranch { branch: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required configuration missing: {field}")]
    MissingField { field: String },

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Version file not found: {path}")]
    VersionFileNotFound { path: String },

    #[error("Invalid version string '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { version: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },
}

/// Container engine (docker CLI) errors
#[derive(Error, Debug)]
pub enum DockerError {
    #[error("Build failed for {image}: {message}")]
    BuildFailed { image: String, message: String },

    #[error("Push failed for {image}: {message}")]
    PushFailed { image: String, message: String },

    #[error("Failed to spawn docker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Container registry authentication errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to obtain registry credentials: {message}")]
    CredentialsFailed { message: String },

    #[error("docker login to {host} failed: {message}")]
    LoginFailed { host: String, message: String },
}

/// Chat notification errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },
}
