//! The relay pipeline: decode, present, build, post.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::incident::Alert;
use crate::message::OutboundMessage;
use crate::presentation::{matching_rule, present};
use crate::webhook::{SlackWebhook, WebhookSender};

/// Translates incident alerts into chat messages and forwards them.
///
/// Holds only read-only state, so one instance is shared by all requests.
pub struct AlertRelay {
    config: RelayConfig,
    sender: Arc<dyn WebhookSender>,
}

impl AlertRelay {
    /// Create a relay posting through the Slack webhook in `config`.
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        let sender = Arc::new(SlackWebhook::new(config.webhook_url.clone()));
        Self::with_sender(config, sender)
    }

    /// Create a relay with a specific sender.
    #[must_use]
    pub fn with_sender(config: RelayConfig, sender: Arc<dyn WebhookSender>) -> Self {
        Self { config, sender }
    }

    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Build the outbound message JSON for an alert without sending it.
    pub fn render(&self, alert: &Alert) -> Result<String, RelayError> {
        OutboundMessage::from_alert(alert, &self.config).to_json()
    }

    /// Handle one raw request body and return the JSON that was posted.
    ///
    /// Nothing is sent if the body does not decode.
    pub async fn relay(&self, body: &[u8]) -> Result<String, RelayError> {
        let alert = Alert::from_slice(body)?;
        let presentation = present(&alert.incident);
        info!(
            incident_id = %alert.incident.incident_id,
            state = %alert.incident.state,
            condition = %alert.incident.condition_name,
            version = alert.version,
            level = presentation.level.as_str(),
            rule = matching_rule(&alert.incident).map_or("default", |rule| rule.name),
            "Received alert"
        );
        debug!(alert = ?alert, "Alert body");

        let payload = self.render(&alert)?;
        let response = self.sender.post_payload(&payload).await?;

        debug!(
            sender = self.sender.name(),
            status = %response.status,
            "Payload delivered"
        );

        Ok(payload)
    }
}
