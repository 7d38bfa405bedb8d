//! Slack incoming-webhook client.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::RelayError;

/// Form field carrying the serialized message.
pub const PAYLOAD_FIELD: &str = "payload";

/// What the webhook answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    /// `None` if the body could not be read
    pub body: Option<String>,
}

/// Trait for delivering a serialized message to a chat webhook.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// Get the name of this sender.
    fn name(&self) -> &'static str;

    /// Post the serialized message once. No retries.
    async fn post_payload(&self, payload: &str) -> Result<WebhookResponse, RelayError>;
}

/// Slack-compatible webhook posting `payload=<json>` as a form.
pub struct SlackWebhook {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SlackWebhook {
    /// Create a webhook sender. A missing URL only fails when posting.
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self::with_client(webhook_url, reqwest::Client::new())
    }

    /// Create a webhook sender using an existing HTTP client.
    #[must_use]
    pub fn with_client(webhook_url: Option<String>, client: reqwest::Client) -> Self {
        let webhook_url = webhook_url.filter(|url| !url.is_empty());
        if webhook_url.is_none() {
            warn!("Webhook URL not set, relay requests will fail");
        }
        Self {
            webhook_url,
            client,
        }
    }
}

#[async_trait]
impl WebhookSender for SlackWebhook {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn post_payload(&self, payload: &str) -> Result<WebhookResponse, RelayError> {
        let webhook_url = self
            .webhook_url
            .as_ref()
            .ok_or_else(|| RelayError::NotConfigured("WEBHOOK_URL".to_string()))?;

        debug!(sender = "slack", bytes = payload.len(), "Posting payload");

        let response = self
            .client
            .post(webhook_url)
            .form(&[(PAYLOAD_FIELD, payload)])
            .send()
            .await?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => {
                info!(sender = "slack", status = %status, body = %body, "Webhook response");
                Some(body)
            }
            Err(e) => {
                warn!(
                    sender = "slack",
                    status = %status,
                    error = %e,
                    "Failed to read webhook response body"
                );
                None
            }
        };

        if !status.is_success() {
            warn!(sender = "slack", status = %status, "Webhook returned non-success status");
        }

        Ok(WebhookResponse { status, body })
    }
}
