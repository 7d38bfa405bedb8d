//! Incident-to-chat alert relay.
//!
//! This crate receives monitoring incident webhooks (Stackdriver style),
//! turns each into a Slack-compatible chat message and posts it to an
//! incoming webhook.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use alert_relay::{AlertRelay, RelayConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RelayConfig::new("https://hooks.slack.com/services/T/B/x", "#alerts");
//! let relay = Arc::new(AlertRelay::new(config));
//! alert_relay::server::run_server(relay, "0.0.0.0:8080", "/").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Presentation
//!
//! - Condition names starting with `[DANGER]` mention `<!channel>` in red
//! - Closed incidents are green
//! - Everything else mentions `<!here>` in yellow
//!
//! # Architecture
//!
//! - [`Alert`] / [`Incident`] model the inbound body
//! - [`presentation`] holds the ordered rule chain
//! - [`OutboundMessage`] is the posted payload
//! - [`WebhookSender`] is the seam for the outbound call, [`SlackWebhook`]
//!   the reqwest implementation
//! - [`AlertRelay`] runs one request end to end

pub mod config;
pub mod error;
pub mod incident;
pub mod message;
pub mod presentation;
pub mod relay;
pub mod server;
pub mod telemetry;
pub mod webhook;

pub use config::RelayConfig;
pub use error::RelayError;
pub use incident::{Alert, Incident};
pub use message::{Attachment, Field, OutboundMessage};
pub use presentation::{AlertLevel, Mention, Presentation};
pub use relay::AlertRelay;
pub use webhook::{SlackWebhook, WebhookResponse, WebhookSender};
