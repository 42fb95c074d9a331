//! compression/mod.rs
//! Codec adapter, compiled dictionaries and the dictionary registry.
//!
//! Notes:
//! - The codec is consumed through the `Codec` trait; zstd is the production implementation.
//! - A compiled dictionary holds both the compressor and the decompressor form, so
//!   the two are always created and freed together.
//! - The registry hands out `Arc` handles; a form is freed when its last holder drops it.

pub mod constants;
pub mod types;
pub mod dictionary;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use dictionary::*;
pub use registry::*;
pub use codecs::ZstdCodec;
