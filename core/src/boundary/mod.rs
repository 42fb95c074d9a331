//! boundary/mod.rs
//! Boundary call layer: the operations exported to foreign callers, in safe Rust.
//!
//! Notes:
//! - Codec errors stop here; callers only ever see a `CallStatus` and a sentinel.
//! - Administrative calls return `ConfigurationError`, never a sentinel.
//! - The C ABI and Python bindings only marshal arguments and results around
//!   `CompressionService`.

pub mod types;
pub mod trace;
pub mod service;

pub use types::*;
pub use trace::*;
pub use service::*;
