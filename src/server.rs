//! HTTP server initialization and runtime setup.
//!
//! Loads every redirect source, assembles the handler chain, and runs the
//! Axum server until Ctrl-C.

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::application::load_sources;
use crate::config::Config;
use crate::routes::app_router;

/// Runs the HTTP server with the given configuration.
///
/// Startup is strictly sequential and finishes before the listener binds:
/// - static map
/// - redb store (open with lock retry, seed, snapshot, close)
/// - YAML file
/// - JSON file
///
/// # Errors
///
/// Returns an error if:
/// - Any source fails to load
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let sources = load_sources(&config)
        .await
        .context("Failed to load redirect sources")?;

    let app = app_router(sources);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
