//! logging.rs
//! Subscriber set-up for the bindings. The library itself only emits
//! `tracing` events and never installs a subscriber on its own.

use tracing_subscriber::EnvFilter;

use crate::types::ConfigurationError;

/// Fallback directives when neither a filter nor `RUST_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a stderr `fmt` subscriber once per process.
///
/// `filter` uses `RUST_LOG` syntax; `None` reads `RUST_LOG`, then falls back
/// to `DEFAULT_LOG_FILTER`. A subscriber installed earlier (by us or by the
/// host) is left in place and is not an error.
///
/// # Errors
/// - `ConfigurationError::LogFilter` if `filter` does not parse.
pub fn install_subscriber(filter: Option<&str>) -> Result<(), ConfigurationError> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(ConfigurationError::LogFilter)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
