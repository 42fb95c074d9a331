//! boundary/types.rs
//! Call statuses and the payloads returned by boundary operations.

use std::ffi::CStr;

use num_enum::TryFromPrimitive;

use crate::compression::CodecError;
use crate::constants::SENTINEL_LEN;
use crate::utils::encode_base64;

/// Outcome of a boundary call, stable across the ABI.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CallStatus {
    Ok                 = 0,
    MissingDictionary  = 1,
    CorruptFrame       = 2,
    DictionaryMismatch = 3,
    InvalidArgument    = 4,
    CodecFailure       = 5,
    ConfigurationError = 6,
    Panic              = 7,
}

impl CallStatus {
    pub fn is_ok(self) -> bool {
        self == CallStatus::Ok
    }

    /// NUL-terminated description, shared with the C ABI.
    pub fn message_cstr(self) -> &'static CStr {
        match self {
            CallStatus::Ok                 => c"ok",
            CallStatus::MissingDictionary  => c"missing dictionary, register it first",
            CallStatus::CorruptFrame       => c"input is not a valid compressed frame",
            CallStatus::DictionaryMismatch => c"frame was written with a different dictionary",
            CallStatus::InvalidArgument    => c"invalid argument",
            CallStatus::CodecFailure       => c"codec failure",
            CallStatus::ConfigurationError => c"service configuration error",
            CallStatus::Panic              => c"internal panic",
        }
    }

    pub fn message(self) -> &'static str {
        // all messages are ASCII
        self.message_cstr().to_str().unwrap_or_default()
    }

    /// Description of a raw status code, including codes this build does not know.
    pub fn describe(code: i32) -> &'static CStr {
        CallStatus::try_from(code).map_or(UNKNOWN_STATUS_MESSAGE, CallStatus::message_cstr)
    }
}

pub const UNKNOWN_STATUS_MESSAGE: &CStr = c"unknown status";

impl From<&CodecError> for CallStatus {
    fn from(e: &CodecError) -> Self {
        match e {
            CodecError::CorruptFrame(_) => CallStatus::CorruptFrame,
            CodecError::DictionaryMismatch { .. } => CallStatus::DictionaryMismatch,
            CodecError::InvalidDictionary(_)
            | CodecError::OutputTooLarge { .. }
            | CodecError::Context { .. } => CallStatus::CodecFailure,
        }
    }
}

/// Per-request boundary operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Compress,
    Decompress,
    CompressWithDictionary,
    DecompressWithDictionary,
}

impl Operation {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Compress                 => "compress",
            Operation::Decompress               => "decompress",
            Operation::CompressWithDictionary   => "compress_with_dictionary",
            Operation::DecompressWithDictionary => "decompress_with_dictionary",
        }
    }

    /// Compress-family operations report `SENTINEL_LEN` on failure,
    /// decompress-family operations an empty result.
    pub fn is_compress(self) -> bool {
        matches!(self, Operation::Compress | Operation::CompressWithDictionary)
    }
}

/// Result bytes of a boundary call plus the length the caller should check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    status: CallStatus,
    len: isize,
    data: Vec<u8>,
}

impl Payload {
    pub fn success(data: Vec<u8>) -> Self {
        Self {
            status: CallStatus::Ok,
            len: data.len() as isize,
            data,
        }
    }

    pub fn failure(op: Operation, status: CallStatus) -> Self {
        Self {
            status,
            len: if op.is_compress() { SENTINEL_LEN } else { 0 },
            data: Vec::new(),
        }
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Byte length on success; `SENTINEL_LEN` or 0 on failure.
    pub fn len(&self) -> isize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn into_parts(self) -> (CallStatus, isize, Vec<u8>) {
        (self.status, self.len, self.data)
    }

    /// Re-encode the result as base64 text, keeping status and sentinel.
    pub fn into_base64(self) -> EncodedPayload {
        if !self.status.is_ok() {
            return EncodedPayload {
                status: self.status,
                len: self.len,
                text: String::new(),
            };
        }
        let text = encode_base64(&self.data);
        EncodedPayload {
            status: self.status,
            len: text.len() as isize,
            text,
        }
    }
}

/// Base64 text result of a boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    status: CallStatus,
    len: isize,
    text: String,
}

impl EncodedPayload {
    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn len(&self) -> isize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_parts(self) -> (CallStatus, isize, String) {
        (self.status, self.len, self.text)
    }
}
