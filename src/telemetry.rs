//! Tracing/logging initialization.

use tracing_subscriber::{EnvFilter, fmt};

use biblio_core::config::logging::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// The `RUST_LOG` environment variable takes precedence over the
/// configured level. Call once at process start-up; a second call is a
/// no-op because the global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        _ => fmt().pretty().with_env_filter(filter).with_target(true).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
