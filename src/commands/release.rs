//! Full release pipeline command

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::config::{read_version, PipelineConfig};
use crate::domain::BuildContext;
use crate::infrastructure::{ChatNotifier, DockerClient, EcrAuth};
use crate::services::ReleaseService;
use crate::tools::{get_tool_path, tools};
use crate::ui;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    branch: String,
    build_number: u64,
    repository: Option<String>,
    region: Option<String>,
    webhook_url: Option<String>,
    channel: Option<String>,
    no_notify: bool,
    config_path: String,
    version_file: Option<String>,
    dockerfile: Option<String>,
    context: Option<String>,
) -> Result<()> {
    ui::print_header("Release Pipeline");

    let mut config = PipelineConfig::load(Path::new(&config_path))
        .context("Failed to load pipeline configuration")?;

    // CLI flags override file values
    if let Some(repository) = repository {
        config.registry.repository = repository;
    }
    if let Some(region) = region {
        config.registry.region = region;
    }
    if let Some(webhook_url) = webhook_url {
        config.notify.webhook_url = webhook_url;
    }
    if let Some(channel) = channel {
        config.notify.channel = channel;
    }
    if no_notify {
        config.notify.disabled = true;
    }
    if let Some(version_file) = version_file {
        config.version_file = version_file;
    }
    if let Some(dockerfile) = dockerfile {
        config.docker.dockerfile = dockerfile;
    }
    if let Some(context) = context {
        config.docker.context = context;
    }

    config.validate().context("Invalid pipeline configuration")?;
    preflight();

    let version = read_version(Path::new(&config.version_file))
        .context("Failed to read version file")?;
    let ctx = BuildContext::new(branch, version, build_number);

    info!("Branch: {}", ctx.branch);
    info!("Version: {}", ctx.version);
    info!("Build: #{}", ctx.build_number);
    info!("Run id: {}", ctx.run_id);
    println!();

    let service = ReleaseService::new(
        DockerClient::new(),
        EcrAuth::new(config.registry.region.clone()),
        ChatNotifier::new(config.notify.webhook_url.clone()),
    );

    let report = match service.execute(&config, &ctx).await {
        Ok(report) => report,
        Err(e) => {
            ui::print_error(&format!("Release failed: {:#}", e));
            return Err(e.into());
        }
    };

    // Stage summary
    println!();
    println!("{}", "=== Stage Summary ===".bright_white().bold());
    let total = report.steps.len();
    for (index, step) in report.steps.iter().enumerate() {
        let icon = if step.success { "✅" } else { "❌" };
        let detail = match &step.error {
            Some(error) => format!(" — {}", error),
            None => String::new(),
        };
        ui::print_step(
            index + 1,
            total,
            &format!(
                "{} {} ({:.1}s){}",
                icon,
                step.step.name(),
                step.duration.as_secs_f64(),
                detail
            ),
        );
    }
    println!();

    let elapsed = chrono::Utc::now().signed_duration_since(ctx.started_at);
    info!(
        "Outcome: {} in {:.1}s",
        report.outcome.name(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    if let Some(image) = &report.image {
        ui::print_success(&format!("Released {}", image));
    }

    Ok(())
}

/// Warn early when a required external CLI is not resolvable.
///
/// The pipeline would fail at the corresponding stage anyway; this just
/// moves the diagnosis before the start notification goes out.
fn preflight() {
    for tool in [tools::DOCKER, tools::AWS] {
        let path = get_tool_path(tool);
        if which::which(&path).is_err() {
            ui::print_warning(&format!(
                "'{}' not found on PATH; the pipeline will fail at its stage",
                path
            ));
        }
    }
}
