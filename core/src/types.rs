//! types.rs
//! Administrative error type shared by the service and its bindings.

use std::path::PathBuf;

use crate::compression::RegistryError;

/// Fatal error of an administrative call (dictionary loading, service set-up).
///
/// Kept apart from per-request statuses: it means the service is
/// misconfigured, not that one payload was bad.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary '{name}' is not valid base64: {source}")]
    Encoding {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid log filter: {0}")]
    LogFilter(#[source] tracing_subscriber::filter::ParseError),
}
