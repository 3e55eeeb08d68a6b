//! Container registry authentication
//!
//! Obtains a short-lived password from the cloud registry CLI
//! (`aws ecr get-login-password`) and pipes it into
//! `docker login --password-stdin` so the credential never touches
//! the process argument list.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::info;

use crate::error::RegistryError;
use crate::tools::{get_tool_path, tools};

/// Seam between the pipeline and registry authentication
#[async_trait]
pub trait RegistryAuth: Send + Sync {
    /// Authenticate the container engine against the registry host
    async fn login(&self, host: &str) -> Result<(), RegistryError>;
}

/// AWS ECR implementation of [`RegistryAuth`]
pub struct EcrAuth {
    region: String,
}

impl EcrAuth {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

#[async_trait]
impl RegistryAuth for EcrAuth {
    async fn login(&self, host: &str) -> Result<(), RegistryError> {
        let aws = get_tool_path(tools::AWS);
        info!(">>> aws ecr get-login-password --region {}", self.region);

        let credentials = Command::new(&aws)
            .args(["ecr", "get-login-password", "--region", &self.region])
            .output()
            .await
            .map_err(|e| RegistryError::CredentialsFailed {
                message: e.to_string(),
            })?;

        if !credentials.status.success() {
            return Err(RegistryError::CredentialsFailed {
                message: String::from_utf8_lossy(&credentials.stderr)
                    .trim()
                    .to_string(),
            });
        }

        let docker = get_tool_path(tools::DOCKER);
        info!(">>> docker login --username AWS --password-stdin {}", host);

        let mut login = Command::new(&docker)
            .args(["login", "--username", "AWS", "--password-stdin", host])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RegistryError::LoginFailed {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = login.stdin.take() {
            stdin.write_all(credentials.stdout.as_slice()).await.map_err(|e| {
                RegistryError::LoginFailed {
                    host: host.to_string(),
                    message: e.to_string(),
                }
            })?;
            drop(stdin);
        }

        let output = login
            .wait_with_output()
            .await
            .map_err(|e| RegistryError::LoginFailed {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(RegistryError::LoginFailed {
                host: host.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Authenticated to {}", host);
        Ok(())
    }
}
