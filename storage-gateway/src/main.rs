use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use storage_gateway::{
    build_router,
    config::Config,
    logging,
    storage::{ObjectLocator, S3ObjectStore},
    AppState,
};

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;
    config.validate().context("Invalid configuration")?;

    info!("Starting Storage Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!(?config, "Configuration loaded");

    let store = S3ObjectStore::new(&config.storage).await;
    info!("S3 client initialized successfully");

    let state = AppState::new(Arc::new(store), ObjectLocator::from_config(&config.storage));
    let app = build_router(state, &config.server);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .context("Failed to bind to address")?;

    info!("Storage Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Storage Gateway shut down gracefully");
    Ok(())
}
