//! Standalone chat notification command

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::config::PipelineConfig;
use crate::infrastructure::{ChatMessage, ChatNotifier, MessageColor, Notifier};
use crate::ui;

pub async fn execute(
    text: String,
    webhook_url: Option<String>,
    channel: Option<String>,
    color: String,
    config_path: String,
) -> Result<()> {
    let mut config = PipelineConfig::load(Path::new(&config_path))
        .context("Failed to load pipeline configuration")?;

    if let Some(webhook_url) = webhook_url {
        config.notify.webhook_url = webhook_url;
    }
    if let Some(channel) = channel {
        config.notify.channel = channel;
    }
    config.notify.validate()?;

    let color: MessageColor = color.parse().map_err(|e: String| anyhow!(e))?;

    let notifier = ChatNotifier::new(config.notify.webhook_url.clone());
    let message = ChatMessage::new(config.notify.channel.as_str(), color, text);
    notifier
        .send(&message)
        .await
        .context("Failed to deliver notification")?;

    ui::print_success(&format!("Notified {}", config.notify.channel));
    Ok(())
}
