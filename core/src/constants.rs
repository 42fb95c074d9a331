//! constants.rs
//! Service-wide defaults and boundary sentinels.

/// Default zstd compression level (zstd's own default).
pub const DEFAULT_LEVEL: i32 = 3;

/// Default cap on the size of any decompressed payload (256 MiB).
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 256 * 1024 * 1024;

/// Length reported by compress-family boundary calls when they fail.
pub const SENTINEL_LEN: isize = -1;

/// Raw dictionaries shorter than this are rejected (zstd ignores them anyway).
pub const MIN_DICT_LEN: usize = 8;
/// Raw dictionaries larger than this are rejected (16 MiB).
pub const MAX_DICT_LEN: usize = 16 * 1024 * 1024;

/// Magic number that prefixes trained zstd dictionaries (little-endian 0xEC30A437).
pub const MAGIC_DICT: [u8; 4] = [0x37, 0xA4, 0x30, 0xEC];

/// Bytes of payload shown in debug traces.
pub const TRACE_PREVIEW_LEN: usize = 32;
