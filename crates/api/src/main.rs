//! Tutorium - office-hours scheduling service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tutorium_domain::{Result, TutoriumError};
use tutorium_infra::config;
use tutorium_lib::{build_router, AppContext};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging FIRST so we can see .env loading
    init_tracing();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded .env from: {:?}", path),
        Err(e) => tracing::debug!("Could not load .env file: {}", e),
    }

    let cfg = config::load()?;
    let ctx = Arc::new(AppContext::new_with_config(cfg)?);

    let addr = format!("{}:{}", ctx.config.server.host, ctx.config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| TutoriumError::Internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Tutorium listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TutoriumError::Internal(format!("Server error: {e}")))?;

    tracing::info!("Tutorium shut down cleanly");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TUTORIUM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves when SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
