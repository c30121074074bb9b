//! Tracing subscriber setup for the binary.

use crate::LoggingSettings;
use hokusai_error::ConfigError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` wins over both.
///
/// # Errors
///
/// Returns [`ConfigError`] if the level is not a valid filter directive or a
/// subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings, verbose: bool) -> Result<(), ConfigError> {
    let env_filter = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(settings.level()))
    }
    .map_err(|e| ConfigError::new(format!("Invalid log filter '{}': {}", settings.level(), e)))?;

    let fmt_layer = if *settings.json() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))
}
