//! alert-relay - forwards monitoring incident webhooks to a Slack channel.
//!
//! # Environment Variables
//!
//! - `WEBHOOK_URL` - Slack incoming webhook URL
//! - `CHANNEL` - Destination channel
//! - `LISTEN_ADDR` / `PORT` - Bind address, or just the port on `0.0.0.0`
//! - `RUST_LOG` - Log filter

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use alert_relay::config::DEFAULT_USERNAME;
use alert_relay::server::{run_server, DEFAULT_ROUTE};
use alert_relay::telemetry::init_tracing;
use alert_relay::{AlertRelay, RelayConfig};

/// Relay monitoring incidents to a chat webhook.
#[derive(Parser, Debug)]
#[command(name = "alert-relay")]
#[command(about = "Relay monitoring incident webhooks to a Slack channel")]
#[command(version)]
struct Cli {
    /// Slack incoming webhook URL
    #[arg(long, env = "WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Channel to post to
    #[arg(long, env = "CHANNEL", default_value = "")]
    channel: String,

    /// Sender display name
    #[arg(long, env = "RELAY_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    /// Sender icon emoji, e.g. `:rotating_light:`
    #[arg(long, env = "RELAY_ICON_EMOJI")]
    icon_emoji: Option<String>,

    /// Sender icon URL
    #[arg(long, env = "RELAY_ICON_URL")]
    icon_url: Option<String>,

    /// Address to listen on (overrides --port)
    #[arg(long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Port to listen on when no address is given
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Path of the relay endpoint
    #[arg(long, env = "RELAY_ROUTE", default_value = DEFAULT_ROUTE)]
    route: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn listen_addr(&self) -> String {
        self.listen
            .clone()
            .unwrap_or_else(|| format!("0.0.0.0:{}", self.port))
    }

    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            webhook_url: self.webhook_url.clone(),
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: self.icon_emoji.clone(),
            icon_url: self.icon_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json).context("Failed to initialize tracing")?;

    let config = cli.relay_config();
    info!(
        channel = %config.channel,
        has_webhook = config.has_webhook(),
        username = %config.username,
        "Relay configured"
    );

    let relay = Arc::new(AlertRelay::new(config));
    let addr = cli.listen_addr();

    run_server(relay, &addr, &cli.route)
        .await
        .with_context(|| format!("Alert relay server on {addr} failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["alert-relay"]).unwrap();
        assert_eq!(cli.route, "/");
        assert_eq!(cli.username, DEFAULT_USERNAME);
    }

    #[test]
    fn test_listen_overrides_port() {
        let cli = Cli::try_parse_from(["alert-relay", "--port", "9000"]).unwrap();
        assert_eq!(cli.listen_addr(), "0.0.0.0:9000");

        let cli = Cli::try_parse_from([
            "alert-relay",
            "--port",
            "9000",
            "--listen",
            "127.0.0.1:7000",
        ])
        .unwrap();
        assert_eq!(cli.listen_addr(), "127.0.0.1:7000");
    }

    #[test]
    fn test_relay_config_from_flags() {
        let cli = Cli::try_parse_from([
            "alert-relay",
            "--webhook-url",
            "https://hooks.example.com/x",
            "--channel",
            "#ops",
            "--icon-emoji",
            ":fire:",
        ])
        .unwrap();
        let config = cli.relay_config();
        assert!(config.has_webhook());
        assert_eq!(config.channel, "#ops");
        assert_eq!(config.icon_emoji.as_deref(), Some(":fire:"));
        assert_eq!(config.icon_url, None);
    }
}
