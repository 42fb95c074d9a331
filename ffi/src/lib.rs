//! zdict-ffi
//!
//! C ABI over `zdict-core`, callable from cgo, ctypes or plain C.
//!
//! Memory management follows these rules:
//! - A service handle from `zdict_service_new*` is freed with `zdict_service_free`.
//! - A `ZdictBuffer` returned by a compress/decompress call is owned by the caller
//!   from the moment the call returns and must be passed to `zdict_buffer_free`
//!   exactly once. The library never frees it on its own.
//! - A `ZdictString` (base64 variants) and the JSON from `zdict_stats_json` are
//!   freed with `zdict_string_free`.
//! - Null results need no release; both free functions accept them.
//!
//! Failure signalling:
//! - compress-family calls return `len == -1` plus a non-zero `status`.
//! - decompress-family calls return an empty result plus a non-zero `status`.
//! - administrative calls return `ZDICT_CONFIGURATION_ERROR`.
//!
//! No Rust panic unwinds into the caller: every entry point runs under
//! `catch_unwind` and reports `ZDICT_PANIC` instead.

mod guard;

pub mod types;
pub mod service;
pub mod calls;
pub mod logging;

pub use types::*;
pub use service::*;
pub use calls::*;
pub use logging::*;
