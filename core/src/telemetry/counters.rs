//! telemetry/counters.rs
//! Counters updated by the boundary layer.
//!
//! Summary: one set of call/byte counters per operation plus failure counts
//! by status. Converted into an immutable `TelemetrySnapshot` on demand.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::boundary::{CallStatus, Operation};
use crate::telemetry::snapshot::{DictionaryCounts, FailureCounts, OperationStats, TelemetrySnapshot};

#[derive(Default, Debug)]
struct OperationCounters {
    calls: AtomicU64,
    failures: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
}

impl OperationCounters {
    fn stats(&self) -> OperationStats {
        OperationStats {
            calls: self.calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            bytes_in: self.bytes_in.load(Ordering::Relaxed),
            bytes_out: self.bytes_out.load(Ordering::Relaxed),
        }
    }
}

/// Counters shared by every call on one service.
#[derive(Default, Debug)]
pub struct ServiceCounters {
    operations: [OperationCounters; Operation::COUNT],

    missing_dictionary: AtomicU64,
    corrupt_frame: AtomicU64,
    dictionary_mismatch: AtomicU64,
    invalid_argument: AtomicU64,
    codec_failure: AtomicU64,

    dictionaries_added: AtomicU64,
    dictionaries_released: AtomicU64,
    configuration_errors: AtomicU64,
}

impl ServiceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed boundary call.
    pub fn record_call(&self, op: Operation, status: CallStatus, bytes_in: usize, bytes_out: usize) {
        let counters = &self.operations[op.index()];
        counters.calls.fetch_add(1, Ordering::Relaxed);
        counters.bytes_in.fetch_add(bytes_in as u64, Ordering::Relaxed);
        counters.bytes_out.fetch_add(bytes_out as u64, Ordering::Relaxed);

        let by_status = match status {
            CallStatus::Ok => return,
            CallStatus::MissingDictionary => &self.missing_dictionary,
            CallStatus::CorruptFrame => &self.corrupt_frame,
            CallStatus::DictionaryMismatch => &self.dictionary_mismatch,
            CallStatus::InvalidArgument => &self.invalid_argument,
            CallStatus::CodecFailure | CallStatus::ConfigurationError | CallStatus::Panic => {
                &self.codec_failure
            }
        };
        counters.failures.fetch_add(1, Ordering::Relaxed);
        by_status.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_added(&self) {
        self.dictionaries_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionaries_released(&self, count: usize) {
        self.dictionaries_released.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_configuration_error(&self) {
        self.configuration_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy. Individual counters are read independently.
    pub fn snapshot(&self, dictionaries_registered: usize) -> TelemetrySnapshot {
        TelemetrySnapshot::from_parts(
            self.operations[Operation::Compress.index()].stats(),
            self.operations[Operation::Decompress.index()].stats(),
            self.operations[Operation::CompressWithDictionary.index()].stats(),
            self.operations[Operation::DecompressWithDictionary.index()].stats(),
            FailureCounts {
                missing_dictionary: self.missing_dictionary.load(Ordering::Relaxed),
                corrupt_frame: self.corrupt_frame.load(Ordering::Relaxed),
                dictionary_mismatch: self.dictionary_mismatch.load(Ordering::Relaxed),
                invalid_argument: self.invalid_argument.load(Ordering::Relaxed),
                codec_failure: self.codec_failure.load(Ordering::Relaxed),
            },
            DictionaryCounts {
                registered: dictionaries_registered as u64,
                added: self.dictionaries_added.load(Ordering::Relaxed),
                released: self.dictionaries_released.load(Ordering::Relaxed),
                configuration_errors: self.configuration_errors.load(Ordering::Relaxed),
            },
        )
    }
}
