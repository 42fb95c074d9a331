//! zdict-core
//!
//! Dictionary-aware zstd compression service.
//! No FFI here: the C ABI and Python bindings live in their own crates.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod logging;

// Codec adapter and dictionary registry
pub mod compression;

// Boundary call layer
pub mod boundary;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::boundary::{CallStatus, CompressionService, EncodedPayload, Operation, Payload};
    pub use crate::compression::{Codec, CodecError, CompiledDictionary, DictionaryRegistry, RegistryError, ZstdCodec};
    pub use crate::config::{DictionarySource, ServiceConfig};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::ConfigurationError;
}
