//! Service handles and administrative entry points.

use std::ffi::CString;
use std::ptr;

use libc::c_char;
use tracing::error;

use zdict_core::boundary::{CallStatus, CompressionService};
use zdict_core::config::ServiceConfig;

use crate::guard::{guard, str_arg};
use crate::types::{ZDICT_CONFIGURATION_ERROR, ZDICT_INVALID_ARGUMENT, ZDICT_OK, ZDICT_PANIC};

/// Opaque service handle. Owns its registry, debug flag and counters.
pub struct ZdictService {
    pub(crate) inner: CompressionService,
}

/// Borrow the service behind a handle, `None` for null.
///
/// # Safety
/// A non-null `svc` must come from `zdict_service_new*` and not be freed yet.
pub(crate) unsafe fn service_ref<'a>(svc: *const ZdictService) -> Option<&'a CompressionService> {
    svc.as_ref().map(|s| &s.inner)
}

/// Create a service with default settings and an empty registry.
#[no_mangle]
pub extern "C" fn zdict_service_new() -> *mut ZdictService {
    guard("zdict_service_new", ptr::null_mut(), || {
        Box::into_raw(Box::new(ZdictService { inner: CompressionService::new() }))
    })
}

/// Create a service from a JSON configuration. Returns null when the
/// configuration is malformed or one of its dictionaries cannot be loaded.
///
/// # Safety
/// `config_json` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn zdict_service_new_with_config(config_json: *const c_char) -> *mut ZdictService {
    guard("zdict_service_new_with_config", ptr::null_mut(), || {
        let text = match str_arg(config_json) {
            Ok(text) => text,
            Err(reason) => {
                error!(reason, "rejecting service configuration");
                return ptr::null_mut();
            }
        };
        let built = ServiceConfig::from_json(text).and_then(|config| CompressionService::from_config(&config));
        match built {
            Ok(inner) => Box::into_raw(Box::new(ZdictService { inner })),
            Err(e) => {
                error!(error = %e, "service configuration failed");
                ptr::null_mut()
            }
        }
    })
}

/// Destroy a service. Buffers already handed out stay valid.
///
/// # Safety
/// `svc` must be null or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn zdict_service_free(svc: *mut ZdictService) {
    if svc.is_null() {
        return;
    }
    guard("zdict_service_free", (), || drop(Box::from_raw(svc)));
}

/// # Safety
/// `svc` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn zdict_set_debug(svc: *const ZdictService, enabled: bool) {
    if let Some(service) = service_ref(svc) {
        service.set_debug(enabled);
    }
}

/// # Safety
/// `svc` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn zdict_enable_debug(svc: *const ZdictService) {
    zdict_set_debug(svc, true);
}

/// # Safety
/// `svc` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn zdict_disable_debug(svc: *const ZdictService) {
    zdict_set_debug(svc, false);
}

/// Register a dictionary from a base64 file, replacing any entry with the
/// same name. Returns `ZDICT_OK` or `ZDICT_CONFIGURATION_ERROR`.
///
/// # Safety
/// `svc` must be null or a live handle; `name` and `path` must be null or
/// NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn zdict_add_dictionary(
    svc: *const ZdictService,
    name: *const c_char,
    path: *const c_char,
) -> i32 {
    guard("zdict_add_dictionary", ZDICT_PANIC, || {
        let Some(service) = service_ref(svc) else {
            return ZDICT_INVALID_ARGUMENT;
        };
        let (name, path) = match (str_arg(name), str_arg(path)) {
            (Ok(name), Ok(path)) => (name, path),
            _ => return ZDICT_INVALID_ARGUMENT,
        };
        admin_status(service.add_dictionary(name, path))
    })
}

/// Register a dictionary from in-memory base64 text.
///
/// # Safety
/// `svc` must be null or a live handle; `name` and `text` must be null or
/// NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn zdict_add_dictionary_base64(
    svc: *const ZdictService,
    name: *const c_char,
    text: *const c_char,
) -> i32 {
    guard("zdict_add_dictionary_base64", ZDICT_PANIC, || {
        let Some(service) = service_ref(svc) else {
            return ZDICT_INVALID_ARGUMENT;
        };
        let (name, text) = match (str_arg(name), str_arg(text)) {
            (Ok(name), Ok(text)) => (name, text),
            _ => return ZDICT_INVALID_ARGUMENT,
        };
        admin_status(service.add_dictionary_base64(name, text))
    })
}

/// Detach every registered dictionary. In-flight calls keep theirs until
/// they return.
///
/// # Safety
/// `svc` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn zdict_release_dictionaries(svc: *const ZdictService) {
    guard("zdict_release_dictionaries", (), || {
        if let Some(service) = service_ref(svc) {
            service.release_dictionaries();
        }
    });
}

/// Telemetry snapshot as JSON, freed with `zdict_string_free`. Null on a
/// null handle.
///
/// # Safety
/// `svc` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn zdict_stats_json(svc: *const ZdictService) -> *mut c_char {
    guard("zdict_stats_json", ptr::null_mut(), || {
        let Some(service) = service_ref(svc) else {
            return ptr::null_mut();
        };
        match service.stats().to_json().map(CString::new) {
            Ok(Ok(json)) => json.into_raw(),
            _ => ptr::null_mut(),
        }
    })
}

/// Static description of a status code. Never null; never freed.
#[no_mangle]
pub extern "C" fn zdict_status_message(status: i32) -> *const c_char {
    CallStatus::describe(status).as_ptr()
}

fn admin_status<E>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => ZDICT_OK,
        Err(_) => ZDICT_CONFIGURATION_ERROR,
    }
}
