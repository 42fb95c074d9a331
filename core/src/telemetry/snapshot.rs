//! telemetry/snapshot.rs
//!
//! Immutable telemetry snapshot.
//!
//! Design notes:
//! - Plain `u64` fields and one derived ratio; serialised as JSON across the boundary.
//! - `compression_ratio` is compressed output over plaintext input for the
//!   compress-family operations (0.0 before any input).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStats {
    pub calls: u64,
    pub failures: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    pub missing_dictionary: u64,
    pub corrupt_frame: u64,
    pub dictionary_mismatch: u64,
    pub invalid_argument: u64,
    pub codec_failure: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryCounts {
    pub registered: u64,
    pub added: u64,
    pub released: u64,
    pub configuration_errors: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub compress: OperationStats,
    pub decompress: OperationStats,
    pub compress_with_dictionary: OperationStats,
    pub decompress_with_dictionary: OperationStats,
    pub failures: FailureCounts,
    pub dictionaries: DictionaryCounts,
    pub compression_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from_parts(
        compress: OperationStats,
        decompress: OperationStats,
        compress_with_dictionary: OperationStats,
        decompress_with_dictionary: OperationStats,
        failures: FailureCounts,
        dictionaries: DictionaryCounts,
    ) -> Self {
        let plaintext = compress.bytes_in + compress_with_dictionary.bytes_in;
        let compressed = compress.bytes_out + compress_with_dictionary.bytes_out;
        let compression_ratio = if plaintext > 0 {
            compressed as f64 / plaintext as f64
        } else {
            0.0
        };

        Self {
            compress,
            decompress,
            compress_with_dictionary,
            decompress_with_dictionary,
            failures,
            dictionaries,
            compression_ratio,
        }
    }

    pub fn total_calls(&self) -> u64 {
        self.compress.calls
            + self.decompress.calls
            + self.compress_with_dictionary.calls
            + self.decompress_with_dictionary.calls
    }

    pub fn total_failures(&self) -> u64 {
        self.compress.failures
            + self.decompress.failures
            + self.compress_with_dictionary.failures
            + self.decompress_with_dictionary.failures
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
