//! Chat notifications
//!
//! Posts pipeline status messages to an incoming-webhook endpoint.
//! The payload carries channel, color and text fields.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::NotifyError;

/// Attachment color conveying the message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageColor {
    /// Pipeline started
    Info,
    /// Success
    Good,
    /// Aborted before any external action
    Warning,
    /// Failure
    Danger,
}

impl std::str::FromStr for MessageColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            other => Err(format!(
                "unknown color '{}', expected info|good|warning|danger",
                other
            )),
        }
    }
}

/// Webhook payload
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub channel: String,
    pub color: MessageColor,
    pub text: String,
}

impl ChatMessage {
    pub fn new(channel: impl Into<String>, color: MessageColor, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            color,
            text: text.into(),
        }
    }
}

/// Seam between the pipeline and the chat system
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError>;
}

/// Webhook implementation of [`Notifier`]
pub struct ChatNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl ChatNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for ChatNotifier {
    async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError> {
        debug!(channel = %message.channel, "Sending chat notification");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_payload_fields() {
        let message = ChatMessage::new("#releases", MessageColor::Good, "app v1.2.3 released");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["channel"], "#releases");
        assert_eq!(json["color"], "good");
        assert_eq!(json["text"], "app v1.2.3 released");
    }

    #[test]
    fn test_color_serialization() {
        assert_eq!(
            serde_json::to_string(&MessageColor::Danger).unwrap(),
            "\"danger\""
        );
        assert_eq!(
            serde_json::to_string(&MessageColor::Warning).unwrap(),
            "\"warning\""
        );
    }
}
