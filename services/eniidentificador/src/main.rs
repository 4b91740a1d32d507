//! ENI identifier service
//!
//! Issues unique, strictly increasing identifiers for documents and case
//! files, scoped by organizational unit, year and mode. Counters live in
//! Postgres; the table is provisioned on startup if missing.

use std::sync::Arc;

use anyhow::Result;
use eni_identificador::{
    allocator::Allocator,
    api, config,
    db::{CounterStore, Database},
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to ENI_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting ENI identifier service");
    info!(
        listen_addr = %config.listen_addr,
        schema = %config.database.schema,
        max_attempts = config.allocator_max_attempts,
        "Configuration loaded"
    );

    // Connect to database
    let db = match Database::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    let store = db.counter_store(&config.database.schema)?;
    if let Err(e) = store.ensure_schema().await {
        error!(error = %e, "Failed to provision counter table");
        db.close().await;
        return Err(e.into());
    }

    let allocator = Allocator::new(Arc::new(store)).with_max_attempts(config.allocator_max_attempts);
    let state = AppState::new(allocator);

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = &result {
        error!(error = %e, "Server error");
    }

    db.close().await;
    info!("ENI identifier service shutdown complete");

    result.map_err(Into::into)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Received shutdown signal");
}
