// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farmhand relay API server.
//!
//! Authenticates mobile clients with Firebase ID tokens and relays their
//! requests to the Realtime Database.

use farmhand_relay::{
    config::Config,
    db::RealtimeDb,
    services::{DatabaseTokenSource, FirebaseTokenVerifier},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting farmhand relay");

    // The emulator needs no credentials, so a missing key is only fatal
    // once the database client is built.
    let token_source = match DatabaseTokenSource::new(&config.credentials_path).await {
        Ok(source) => Some(Arc::new(source)),
        Err(e) => {
            tracing::warn!(
                path = %config.credentials_path.display(),
                error = ?e,
                "Google credentials unavailable"
            );
            None
        }
    };

    let db = RealtimeDb::new(&config.database_url, token_source)?;

    let token_verifier = Arc::new(FirebaseTokenVerifier::new(&config)?);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        token_verifier,
    });

    // Build router
    let app = farmhand_relay::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("farmhand_relay=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
