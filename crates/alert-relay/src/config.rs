//! Relay configuration.

/// Default sender name shown in the chat channel.
pub const DEFAULT_USERNAME: &str = "Alert by Stackdriver";

/// Runtime configuration, read once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Incoming webhook URL. Not validated; a missing URL fails on first use.
    pub webhook_url: Option<String>,
    /// Destination channel name
    pub channel: String,
    /// Sender display name
    pub username: String,
    pub icon_emoji: Option<String>,
    pub icon_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel: String::new(),
            username: DEFAULT_USERNAME.to_string(),
            icon_emoji: None,
            icon_url: None,
        }
    }
}

impl RelayConfig {
    /// Create a config posting to the given webhook.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            webhook_url: Some(webhook_url.into()),
            channel: channel.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Check if a webhook URL is set.
    #[must_use]
    pub fn has_webhook(&self) -> bool {
        self.webhook_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
