//! ABI-stable result types and status codes.

use std::ffi::CString;
use std::ptr;

use libc::c_char;

use zdict_core::boundary::{CallStatus, EncodedPayload, Operation, Payload};

pub const ZDICT_OK: i32 = CallStatus::Ok as i32;
pub const ZDICT_MISSING_DICTIONARY: i32 = CallStatus::MissingDictionary as i32;
pub const ZDICT_CORRUPT_FRAME: i32 = CallStatus::CorruptFrame as i32;
pub const ZDICT_DICTIONARY_MISMATCH: i32 = CallStatus::DictionaryMismatch as i32;
pub const ZDICT_INVALID_ARGUMENT: i32 = CallStatus::InvalidArgument as i32;
pub const ZDICT_CODEC_FAILURE: i32 = CallStatus::CodecFailure as i32;
pub const ZDICT_CONFIGURATION_ERROR: i32 = CallStatus::ConfigurationError as i32;
pub const ZDICT_PANIC: i32 = CallStatus::Panic as i32;

/// Bytes handed to the caller.
///
/// `data` is null when `len <= 0`. Otherwise it points to exactly `len`
/// bytes owned by the caller until passed to `zdict_buffer_free`.
#[repr(C)]
#[derive(Debug)]
pub struct ZdictBuffer {
    pub data: *mut u8,
    pub len: isize,
    pub status: i32,
}

impl ZdictBuffer {
    /// Move a payload's bytes into caller-owned memory.
    pub(crate) fn from_payload(payload: Payload) -> Self {
        let (status, len, data) = payload.into_parts();
        if data.is_empty() {
            return Self { data: ptr::null_mut(), len, status: status as i32 };
        }

        // Boxed slice: capacity == len, so the free side can rebuild it exactly.
        let boxed = data.into_boxed_slice();
        let len = boxed.len() as isize;
        Self {
            data: Box::into_raw(boxed) as *mut u8,
            len,
            status: status as i32,
        }
    }

    pub(crate) fn failure(op: Operation, status: CallStatus) -> Self {
        Self::from_payload(Payload::failure(op, status))
    }
}

/// NUL-terminated base64 text handed to the caller.
///
/// `data` is null on failure; otherwise owned by the caller until passed to
/// `zdict_string_free`. `len` excludes the terminator.
#[repr(C)]
#[derive(Debug)]
pub struct ZdictString {
    pub data: *mut c_char,
    pub len: isize,
    pub status: i32,
}

impl ZdictString {
    pub(crate) fn from_encoded(payload: EncodedPayload) -> Self {
        let (status, len, text) = payload.into_parts();
        if !status.is_ok() {
            return Self { data: ptr::null_mut(), len, status: status as i32 };
        }
        match CString::new(text) {
            Ok(text) => Self {
                data: text.into_raw(),
                len,
                status: status as i32,
            },
            // base64 never contains NUL
            Err(_) => Self {
                data: ptr::null_mut(),
                len: -1,
                status: ZDICT_CODEC_FAILURE,
            },
        }
    }

    pub(crate) fn failure(op: Operation, status: CallStatus) -> Self {
        Self::from_encoded(Payload::failure(op, status).into_base64())
    }
}
