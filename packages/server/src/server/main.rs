// Main entry point for the walking-stats API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::{
    kernel::build_pipeline,
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,walk_stats=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting walking-stats parser API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(extractor = ?config.extractor, "Configuration loaded");

    let pipeline = build_pipeline(&config).context("Failed to build pipeline")?;

    // Build application
    let app = build_app(
        AppState::new(Arc::new(pipeline)),
        &config.allowed_origins,
        Some(config.static_dir.clone()),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
