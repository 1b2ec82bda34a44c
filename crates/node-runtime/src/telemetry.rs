//! Logging setup: an `EnvFilter` plus either a pretty or a JSON fmt layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::container::LoggingConfig;

/// Telemetry initialization errors.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Build the filter for `config`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::Filter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(
        level = %config.level,
        json = config.json,
        "[node-runtime] logging initialized"
    );
    Ok(())
}
