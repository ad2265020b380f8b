//! # payrail-receiver
//!
//! ## Usage
//!
//! ```bash
//! export PAYRAIL_WEBHOOK_SECRET=whsec_...
//! export PAYRAIL_WEBHOOK_TOLERANCE_SECS=300   # optional
//!
//! payrail-receiver
//! ```

use anyhow::Context;
use payrail_receiver::{routes, AppState, ReceiverConfig};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = ReceiverConfig::from_env().context("Failed to load receiver configuration")?;
    let addr = config.socket_addr()?;

    info!("Replay tolerance: {}s", config.tolerance.as_secs());

    let app = routes::create_router(AppState::logging(config));

    info!("payrail-receiver {} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);
    info!("Webhook: POST http://{}/webhooks", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
