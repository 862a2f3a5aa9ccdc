//! Structured logging setup

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

const SERVICE_NAME: &str = "storage-gateway";

/// Build the filter: `RUST_LOG` wins, then the configured level.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize logging for the service
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config);

    match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_line_number(true).pretty())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_thread_ids(true),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_target(true))
            .try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(
        service = SERVICE_NAME,
        level = %config.level,
        format = ?config.format,
        "Logging initialized"
    );

    Ok(())
}
