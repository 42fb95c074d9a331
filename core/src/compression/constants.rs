//! compression/constants.rs
//! Codec identifiers used in logs and telemetry.

/// Stable codec names.
pub mod codec_names {
    pub const ZSTD: &str = "zstd";
}

/// Human-readable dictionary id for logs (`raw` for raw-content dictionaries).
pub fn dict_id_label(id: Option<u32>) -> String {
    match id {
        Some(id) => format!("{id:#010x}"),
        None => "raw".to_string(),
    }
}
