//! User Gateway - Main Application Entry Point
//!
//! This is the HTTP front for user management: registration, login, avatar
//! updates, bulk user deletion, and transaction lookup. Every route checks
//! its request against a declarative list of field rules and answers
//! invalid requests itself with HTTP 400 and the complete error list. Valid
//! requests are handed to the user service that owns the business logic.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Validation**: per-route field rules evaluated by a middleware gate
//! - **Business Logic**: upstream HTTP service reached with reqwest
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the upstream client
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod validation;

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::{services::upstream::UpstreamControllers, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create upstream client
    let controllers = UpstreamControllers::new(
        &config.upstream_url,
        Duration::from_secs(config.upstream_timeout_secs),
    )?;
    tracing::info!("Forwarding user operations to {}", controllers.base_url());

    let app = routes::app(AppState::new(Arc::new(controllers)));

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
