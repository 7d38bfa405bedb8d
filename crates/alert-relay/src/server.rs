//! HTTP server for incident webhooks.
//!
//! Provides:
//! - The relay endpoint (`POST /` by default)
//! - A health check at `GET /healthz`

use anyhow::{bail, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::error::RelayError;
use crate::relay::AlertRelay;

/// Default path for the relay endpoint.
pub const DEFAULT_ROUTE: &str = "/";

/// Path of the health check.
pub const HEALTH_ROUTE: &str = "/healthz";

/// Normalize a configured relay path.
///
/// A missing leading `/` is added. Path parameters, wildcards and the
/// health path are rejected.
pub fn normalize_route(route: &str) -> Result<String> {
    let route = route.trim();
    let route = if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{route}")
    };

    if route == HEALTH_ROUTE {
        bail!("relay route {route} collides with the health check");
    }
    if route.contains(['{', '}']) || route.split('/').any(|s| s.starts_with([':', '*'])) {
        bail!("relay route {route} must be a literal path");
    }

    Ok(route)
}

/// Build the router with the relay mounted at `route`.
pub fn build_router(relay: Arc<AlertRelay>, route: &str) -> Result<Router> {
    let route = normalize_route(route)?;

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .route(&route, post(relay_handler))
        .route(HEALTH_ROUTE, get(health_handler))
        .layer(trace)
        .with_state(relay))
}

/// Serve until a shutdown signal arrives.
pub async fn run_server(relay: Arc<AlertRelay>, addr: &str, route: &str) -> Result<()> {
    let app = build_router(relay, route)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, route, "Alert relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Alert relay stopped");
    Ok(())
}

/// Relay an incident body and echo the posted message.
///
/// The body is taken raw so that any decode failure, including a wrong
/// content type, ends in the same empty 500.
async fn relay_handler(
    State(relay): State<Arc<AlertRelay>>,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    let payload = relay.relay(&body).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    ))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
