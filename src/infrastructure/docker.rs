//! Container engine operations
//!
//! Wraps the docker CLI for building, pushing and removing images.
//! Build output is streamed straight to the terminal; push output is
//! captured so failures carry the engine's stderr.

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;
use tracing::{info, warn};

use crate::domain::ImageReference;
use crate::error::DockerError;
use crate::tools::{get_tool_path, tools};

/// Seam between the pipeline and the container engine
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Build an image from a recipe and context directory
    async fn build(
        &self,
        image: &ImageReference,
        dockerfile: &str,
        context: &str,
    ) -> Result<(), DockerError>;

    /// Push an image to its registry
    async fn push(&self, image: &ImageReference) -> Result<(), DockerError>;

    /// Remove a local image. Failures are logged and swallowed.
    async fn remove(&self, image: &ImageReference);
}

/// Docker CLI implementation of [`ContainerEngine`]
pub struct DockerClient;

impl DockerClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DockerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerEngine for DockerClient {
    async fn build(
        &self,
        image: &ImageReference,
        dockerfile: &str,
        context: &str,
    ) -> Result<(), DockerError> {
        let docker = get_tool_path(tools::DOCKER);
        let reference = image.to_string();
        info!(">>> docker build -t {} -f {} {}", reference, dockerfile, context);

        // Inherit stdio so build logs stream to the terminal
        let status = Command::new(&docker)
            .args(["build", "-t", &reference, "-f", dockerfile, context])
            .status()
            .await?;

        if !status.success() {
            return Err(DockerError::BuildFailed {
                image: reference,
                message: format!("exit code: {:?}", status.code()),
            });
        }
        Ok(())
    }

    async fn push(&self, image: &ImageReference) -> Result<(), DockerError> {
        let docker = get_tool_path(tools::DOCKER);
        let reference = image.to_string();
        info!(">>> docker push {}", reference);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Pushing {}...", reference));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        let output = Command::new(&docker)
            .args(["push", &reference])
            .output()
            .await;

        spinner.finish_and_clear();
        let output = output?;

        if !output.stdout.is_empty() {
            info!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
        }
        if !output.status.success() {
            return Err(DockerError::PushFailed {
                image: reference,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn remove(&self, image: &ImageReference) {
        let docker = get_tool_path(tools::DOCKER);
        let reference = image.to_string();
        info!(">>> docker rmi {}", reference);

        match Command::new(&docker)
            .args(["rmi", &reference])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                info!("Removed local image {}", reference);
            }
            Ok(output) => {
                warn!(
                    "Failed to remove local image {} (ignored): {}",
                    reference,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Err(e) => {
                warn!("Failed to run docker rmi (ignored): {}", e);
            }
        }
    }
}
