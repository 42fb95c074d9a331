//! Per-request entry points and result release.

use std::ffi::CString;
use std::ptr;

use libc::{c_char, size_t};

use zdict_core::boundary::{CallStatus, CompressionService, EncodedPayload, Operation, Payload};

use crate::guard::{bytes_arg, guard, str_arg};
use crate::service::{service_ref, ZdictService};
use crate::types::{ZdictBuffer, ZdictString};

/// Marshal a bytes-in/bytes-out call. Bad arguments never reach the codec.
unsafe fn bytes_call(
    entry: &'static str,
    op: Operation,
    svc: *const ZdictService,
    src: *const u8,
    src_len: size_t,
    name: Option<*const c_char>,
    run: impl FnOnce(&CompressionService, &[u8], Option<&str>) -> Payload,
) -> ZdictBuffer {
    guard(entry, ZdictBuffer::failure(op, CallStatus::Panic), || {
        let Some(service) = service_ref(svc) else {
            return ZdictBuffer::failure(op, CallStatus::InvalidArgument);
        };
        let name = match name.map(|p| str_arg(p)).transpose() {
            Ok(name) => name,
            Err(reason) => return ZdictBuffer::from_payload(service.reject(op, None, reason)),
        };
        let payload = match bytes_arg(src, src_len) {
            Ok(input) => run(service, input, name),
            Err(reason) => service.reject(op, name, reason),
        };
        ZdictBuffer::from_payload(payload)
    })
}

/// Marshal a text-in/text-out call.
unsafe fn text_call(
    entry: &'static str,
    op: Operation,
    svc: *const ZdictService,
    text: *const c_char,
    name: Option<*const c_char>,
    run: impl FnOnce(&CompressionService, &str, Option<&str>) -> EncodedPayload,
) -> ZdictString {
    guard(entry, ZdictString::failure(op, CallStatus::Panic), || {
        let Some(service) = service_ref(svc) else {
            return ZdictString::failure(op, CallStatus::InvalidArgument);
        };
        let name = match name.map(|p| str_arg(p)).transpose() {
            Ok(name) => name,
            Err(reason) => return ZdictString::from_encoded(service.reject(op, None, reason).into_base64()),
        };
        let payload = match str_arg(text) {
            Ok(text) => run(service, text, name),
            Err(reason) => service.reject(op, name, reason).into_base64(),
        };
        ZdictString::from_encoded(payload)
    })
}

/// Compress `src` into a standard zstd frame. On failure `len == -1`.
///
/// # Safety
/// `svc` must be null or a live handle; a non-null `src` must be readable
/// for `src_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn zdict_compress(svc: *const ZdictService, src: *const u8, src_len: size_t) -> ZdictBuffer {
    bytes_call("zdict_compress", Operation::Compress, svc, src, src_len, None, |s, input, _| {
        s.compress(input)
    })
}

/// Decompress a standard zstd frame. On failure the result is empty and
/// `status` says why.
///
/// # Safety
/// Same contract as `zdict_compress`.
#[no_mangle]
pub unsafe extern "C" fn zdict_decompress(svc: *const ZdictService, src: *const u8, src_len: size_t) -> ZdictBuffer {
    bytes_call("zdict_decompress", Operation::Decompress, svc, src, src_len, None, |s, input, _| {
        s.decompress(input)
    })
}

/// Compress with the named dictionary. A missing dictionary yields
/// `len == -1` with `ZDICT_MISSING_DICTIONARY`.
///
/// # Safety
/// Same contract as `zdict_compress`; `name` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn zdict_compress_with_dictionary(
    svc: *const ZdictService,
    src: *const u8,
    src_len: size_t,
    name: *const c_char,
) -> ZdictBuffer {
    let op = Operation::CompressWithDictionary;
    bytes_call("zdict_compress_with_dictionary", op, svc, src, src_len, Some(name), |s, input, name| {
        match name {
            Some(name) => s.compress_with_dictionary(input, name),
            None => s.reject(op, None, "missing dictionary name"),
        }
    })
}

/// Decompress a frame written with the named dictionary.
///
/// # Safety
/// Same contract as `zdict_compress_with_dictionary`.
#[no_mangle]
pub unsafe extern "C" fn zdict_decompress_with_dictionary(
    svc: *const ZdictService,
    src: *const u8,
    src_len: size_t,
    name: *const c_char,
) -> ZdictBuffer {
    let op = Operation::DecompressWithDictionary;
    bytes_call("zdict_decompress_with_dictionary", op, svc, src, src_len, Some(name), |s, input, name| {
        match name {
            Some(name) => s.decompress_with_dictionary(input, name),
            None => s.reject(op, None, "missing dictionary name"),
        }
    })
}

/// Base64 in, base64 out.
///
/// # Safety
/// `svc` must be null or a live handle; `text` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn zdict_compress_base64(svc: *const ZdictService, text: *const c_char) -> ZdictString {
    text_call("zdict_compress_base64", Operation::Compress, svc, text, None, |s, text, _| {
        s.compress_base64(text)
    })
}

/// # Safety
/// Same contract as `zdict_compress_base64`.
#[no_mangle]
pub unsafe extern "C" fn zdict_decompress_base64(svc: *const ZdictService, text: *const c_char) -> ZdictString {
    text_call("zdict_decompress_base64", Operation::Decompress, svc, text, None, |s, text, _| {
        s.decompress_base64(text)
    })
}

/// # Safety
/// Same contract as `zdict_compress_base64`; `name` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn zdict_compress_base64_with_dictionary(
    svc: *const ZdictService,
    text: *const c_char,
    name: *const c_char,
) -> ZdictString {
    let op = Operation::CompressWithDictionary;
    text_call("zdict_compress_base64_with_dictionary", op, svc, text, Some(name), |s, text, name| match name {
        Some(name) => s.compress_base64_with_dictionary(text, name),
        None => s.reject(op, None, "missing dictionary name").into_base64(),
    })
}

/// # Safety
/// Same contract as `zdict_compress_base64_with_dictionary`.
#[no_mangle]
pub unsafe extern "C" fn zdict_decompress_base64_with_dictionary(
    svc: *const ZdictService,
    text: *const c_char,
    name: *const c_char,
) -> ZdictString {
    let op = Operation::DecompressWithDictionary;
    text_call("zdict_decompress_base64_with_dictionary", op, svc, text, Some(name), |s, text, name| match name {
        Some(name) => s.decompress_base64_with_dictionary(text, name),
        None => s.reject(op, None, "missing dictionary name").into_base64(),
    })
}

/// Release a buffer returned by this library. Empty buffers are ignored.
///
/// # Safety
/// `buffer` must be exactly as returned and not released before.
#[no_mangle]
pub unsafe extern "C" fn zdict_buffer_free(buffer: ZdictBuffer) {
    if buffer.data.is_null() || buffer.len <= 0 {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(buffer.data, buffer.len as usize);
    drop(Box::from_raw(slice));
}

/// Release a string returned by this library (`ZdictString::data` or
/// `zdict_stats_json`). Null is ignored.
///
/// # Safety
/// `text` must come from this library and not be released before.
#[no_mangle]
pub unsafe extern "C" fn zdict_string_free(text: *mut c_char) {
    if text.is_null() {
        return;
    }
    drop(CString::from_raw(text));
}
