//! telemetry/mod.rs
//! Per-service call counters and immutable snapshots.
//!
//! Notes:
//! - Counters are lock-free atomics updated on every boundary call.
//! - Snapshots are plain values, serialisable to JSON for the bindings.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
