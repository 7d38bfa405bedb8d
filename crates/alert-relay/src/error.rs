//! Error types for the alert relay.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Errors that terminate a relay request.
///
/// Every variant maps to `500 Internal Server Error` with an empty body.
/// Callers only learn that something failed; the detail goes to the logs.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound body is not a valid alert
    #[error("decode alert error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Outbound message could not be serialized
    #[error("marshal error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// HTTP request to the webhook failed
    #[error("post form error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Webhook URL is not configured
    #[error("webhook not configured: {0}")]
    NotConfigured(String),
}

impl RelayError {
    /// Short machine-readable kind, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Serialize(_) => "serialize",
            Self::Transport(_) => "transport",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!(kind = self.kind(), error = %self, "Relay request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
