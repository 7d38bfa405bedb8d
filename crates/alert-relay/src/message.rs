//! Outbound Slack message payload.

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::incident::Alert;
use crate::presentation::present;

/// Chat message posted to the webhook as the `payload` form field.
///
/// Field order here is the JSON key order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub channel: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Display hint, passed through as-is
    pub short: bool,
}

impl OutboundMessage {
    /// Build the message for an alert.
    #[must_use]
    pub fn from_alert(alert: &Alert, config: &RelayConfig) -> Self {
        let incident = &alert.incident;
        let presentation = present(incident);

        Self {
            text: format!(
                "{} {} {}",
                presentation.mention.markup(),
                incident.summary,
                incident.url
            ),
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
            icon_url: config.icon_url.clone(),
            channel: config.channel.clone(),
            attachments: vec![Attachment {
                color: presentation.color().to_string(),
                fields: vec![Field {
                    title: incident.summary.clone(),
                    value: format_details(alert),
                    short: false,
                }],
            }],
        }
    }

    /// Serialize to the JSON sent to the webhook and echoed to the caller.
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(RelayError::Serialize)
    }
}

/// Three-line resource summary shown in the attachment field.
fn format_details(alert: &Alert) -> String {
    let incident = &alert.incident;
    format!(
        "state: {}\nresources_id: {}\nresources_name: {}",
        incident.state, incident.resource_id, incident.resource_name
    )
}
