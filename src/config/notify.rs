//! Chat notification configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Chat webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Incoming-webhook URL of the chat system
    #[serde(default)]
    pub webhook_url: String,

    /// Channel to post to (e.g. "#releases")
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Disable notifications entirely (local runs)
    #[serde(default)]
    pub disabled: bool,
}

fn default_channel() -> String {
    "#ci".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            channel: default_channel(),
            disabled: false,
        }
    }
}

impl NotifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disabled {
            return Ok(());
        }
        if self.webhook_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "notify.webhook_url".to_string(),
            });
        }
        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "notify.webhook_url".to_string(),
                value: self.webhook_url.clone(),
            });
        }
        Ok(())
    }
}
