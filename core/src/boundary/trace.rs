//! boundary/trace.rs
//! Debug flag and the call trace it gates.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::boundary::types::{Operation, Payload};
use crate::utils::{compute_checksum, payload_preview};

/// Per-service switch for call traces.
#[derive(Debug, Default)]
pub struct DebugFlag(AtomicBool);

impl DebugFlag {
    pub fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    pub fn enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}

/// Emit one trace event for a finished call.
///
/// Returns before hashing or formatting anything when the flag is off.
pub fn trace_call(
    flag: &DebugFlag,
    op: Operation,
    dictionary: Option<&str>,
    input: &[u8],
    payload: &Payload,
) {
    if !flag.enabled() {
        return;
    }

    debug!(
        op = op.name(),
        dictionary = dictionary.unwrap_or("-"),
        input_len = input.len(),
        input_crc32 = compute_checksum(input),
        input_preview = %payload_preview(input),
        status = ?payload.status(),
        output_len = payload.len(),
        output_preview = %payload_preview(payload.data()),
        "boundary call"
    );
}
