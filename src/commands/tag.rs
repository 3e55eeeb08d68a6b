//! Image reference derivation command
//!
//! Prints what `release` would build and push, without side effects.
//! With `--quiet` the raw reference goes to stdout for scripting.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{read_version, PipelineConfig};
use crate::domain::BuildContext;
use crate::error::ReleaseError;
use crate::ui;

pub async fn execute(
    branch: String,
    build_number: u64,
    repository: Option<String>,
    config_path: String,
    version_file: Option<String>,
    quiet: bool,
) -> Result<()> {
    let mut config = PipelineConfig::load(Path::new(&config_path))
        .context("Failed to load pipeline configuration")?;

    if let Some(repository) = repository {
        config.registry.repository = repository;
    }
    if let Some(version_file) = version_file {
        config.version_file = version_file;
    }
    config.registry.validate()?;

    let version = read_version(Path::new(&config.version_file))
        .context("Failed to read version file")?;
    let ctx = BuildContext::new(branch, version, build_number);

    let image = ctx
        .image_reference(&config.registry.repository)
        .ok_or_else(|| ReleaseError::UnsupportedBranch {
            branch: ctx.branch.clone(),
        })?;

    if quiet {
        println!("{}", image);
    } else {
        let channel = ctx.channel().map(|c| c.name()).unwrap_or("-");
        ui::print_info(&format!("Branch:    {} ({})", ctx.branch, channel));
        ui::print_info(&format!("Version:   {}", ctx.version));
        ui::print_info(&format!("Build:     #{}", ctx.build_number));
        ui::print_success(&format!("Reference: {}", image));
    }

    Ok(())
}
