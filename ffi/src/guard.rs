//! Panic containment and argument marshaling shared by the entry points.

use std::ffi::CStr;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use libc::c_char;
use tracing::error;

/// Run `f`, turning a panic into `fallback`.
pub(crate) fn guard<T>(entry: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error!(entry, "panic caught at the C boundary");
            fallback
        }
    }
}

/// Borrow `len` bytes at `ptr`. Null is accepted only for an empty slice.
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `len` bytes for `'a`.
pub(crate) unsafe fn bytes_arg<'a>(ptr: *const u8, len: usize) -> Result<&'a [u8], &'static str> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err("null data pointer with non-zero length");
    }
    Ok(slice::from_raw_parts(ptr, len))
}

/// Borrow a NUL-terminated UTF-8 string.
///
/// # Safety
/// A non-null `ptr` must point to a NUL-terminated string valid for `'a`.
pub(crate) unsafe fn str_arg<'a>(ptr: *const c_char) -> Result<&'a str, &'static str> {
    if ptr.is_null() {
        return Err("null string pointer");
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| "string is not valid UTF-8")
}
