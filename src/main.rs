// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game Shelf API Server
//!
//! Serves the games catalog and the local profile's accounts and saved
//! games to the browser frontend.

use anyhow::Context;
use game_shelf::{
    config::Config,
    db::{FileStore, KeyValueStore, MemoryStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Game Shelf API");

    // Pick the storage backend
    let store: Box<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => Box::new(FileStore::open(dir).context("Failed to open data directory")?),
        None => {
            tracing::warn!("DATA_DIR not set; accounts will not survive a restart");
            Box::new(MemoryStore::new())
        }
    };

    tracing::info!(
        catalog = %config.catalog_api_url,
        hash_iterations = config.password_hash_iterations.get(),
        "Catalog client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = game_shelf::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("game_shelf=debug,info"))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
    Ok(())
}

/// Wait for Ctrl+C and shut the server down gracefully.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
