//! compression/codecs/mod.rs
//! Codec implementations.

pub mod zstd;

pub use self::zstd::*;
