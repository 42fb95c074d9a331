//! Subscriber installation for hosts that want the library's `tracing` events.

use libc::c_char;

use zdict_core::logging::install_subscriber;

use crate::guard::{guard, str_arg};
use crate::types::{ZDICT_INVALID_ARGUMENT, ZDICT_OK, ZDICT_PANIC};

/// Route library logs to stderr. `filter` uses `RUST_LOG` syntax; null means
/// `RUST_LOG` or `info`. Returns `ZDICT_INVALID_ARGUMENT` for a bad filter.
///
/// # Safety
/// `filter` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn zdict_init_logging(filter: *const c_char) -> i32 {
    guard("zdict_init_logging", ZDICT_PANIC, || {
        let filter = if filter.is_null() {
            None
        } else {
            match str_arg(filter) {
                Ok(text) => Some(text),
                Err(_) => return ZDICT_INVALID_ARGUMENT,
            }
        };
        match install_subscriber(filter) {
            Ok(()) => ZDICT_OK,
            Err(_) => ZDICT_INVALID_ARGUMENT,
        }
    })
}
