//! WavePredictor HTTP server.
//!
//! Loads the model artifact once, then serves `POST /predict` and
//! `GET /health` until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{router, AppState, PredictionService, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting WavePredictor server with {:?}", config);

    let service = PredictionService::from_artifact(&config.model)?;
    info!("Model loaded, classes: {:?}", service.classes());

    let app = router(AppState::new(service));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
