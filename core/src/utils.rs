//! utils.rs
//! Small helpers shared by the registry, the boundary layer and telemetry.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::{MAGIC_DICT, TRACE_PREVIEW_LEN};

/// CRC32 fingerprint of a payload, used to identify inputs in traces.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Hex rendering of the first bytes of a payload, with a marker when truncated.
pub fn payload_preview(data: &[u8]) -> String {
    if data.len() <= TRACE_PREVIEW_LEN {
        hex::encode(data)
    } else {
        format!("{}..", hex::encode(&data[..TRACE_PREVIEW_LEN]))
    }
}

/// Decode base64 text (standard alphabet). Surrounding whitespace and line
/// breaks, as left by editors and `base64` CLIs, are ignored. Bytes outside
/// the alphabet, including non UTF-8 ones, are decode errors.
pub fn decode_base64_text(text: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = text
        .as_ref()
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// True when the bytes carry the zstd trained-dictionary magic.
pub fn is_trained_dictionary(raw: &[u8]) -> bool {
    raw.len() >= MAGIC_DICT.len() && raw[..MAGIC_DICT.len()] == MAGIC_DICT
}
