//! ffi.rs
//! Python surface: the `Service` class, status constants and logging setup.
//!
//! Notes:
//! - Per-request methods return `(result, status)` and never raise.
//! - Administrative failures raise `rust_zdict.ConfigurationError`.
//! - Codec work runs with the GIL released.

use std::path::PathBuf;

use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use zdict_core::boundary::{CallStatus, CompressionService, EncodedPayload, Payload};
use zdict_core::config::ServiceConfig;
use zdict_core::logging::install_subscriber;
use zdict_core::types::ConfigurationError as CoreConfigurationError;

create_exception!(rust_zdict, ConfigurationError, PyException);

const STATUSES: [(&str, CallStatus); 8] = [
    ("OK", CallStatus::Ok),
    ("MISSING_DICTIONARY", CallStatus::MissingDictionary),
    ("CORRUPT_FRAME", CallStatus::CorruptFrame),
    ("DICTIONARY_MISMATCH", CallStatus::DictionaryMismatch),
    ("INVALID_ARGUMENT", CallStatus::InvalidArgument),
    ("CODEC_FAILURE", CallStatus::CodecFailure),
    ("CONFIGURATION_ERROR", CallStatus::ConfigurationError),
    ("PANIC", CallStatus::Panic),
];

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyService>()?;
    m.add("ConfigurationError", py.get_type_bound::<ConfigurationError>())?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    m.add_function(wrap_pyfunction!(status_message, m)?)?;
    for (name, status) in STATUSES {
        m.add(name, status as i32)?;
    }
    Ok(())
}

fn config_error(e: CoreConfigurationError) -> PyErr {
    ConfigurationError::new_err(e.to_string())
}

fn bytes_result<'py>(py: Python<'py>, payload: Payload) -> (Bound<'py, PyBytes>, i32) {
    (PyBytes::new_bound(py, payload.data()), payload.status() as i32)
}

fn text_result(payload: EncodedPayload) -> (String, i32) {
    let (status, _, text) = payload.into_parts();
    (text, status as i32)
}

/// Compression service with its own dictionary registry.
#[pyclass(name = "Service", module = "rust_zdict", frozen)]
pub struct PyService {
    inner: CompressionService,
}

#[pymethods]
impl PyService {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(py: Python<'_>, config_json: Option<&str>) -> PyResult<Self> {
        let inner = match config_json {
            None => CompressionService::new(),
            Some(text) => py
                .allow_threads(|| {
                    ServiceConfig::from_json(text).and_then(|config| CompressionService::from_config(&config))
                })
                .map_err(config_error)?,
        };
        Ok(Self { inner })
    }

    // --- Diagnostics ---

    fn set_debug(&self, enabled: bool) {
        self.inner.set_debug(enabled);
    }

    fn enable_debug(&self) {
        self.inner.enable_debug();
    }

    fn disable_debug(&self) {
        self.inner.disable_debug();
    }

    #[getter]
    fn debug(&self) -> bool {
        self.inner.debug_enabled()
    }

    /// Telemetry snapshot as a JSON string.
    fn stats(&self) -> PyResult<String> {
        self.inner
            .stats()
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    // --- Dictionaries ---

    fn add_dictionary(&self, py: Python<'_>, name: &str, path: PathBuf) -> PyResult<()> {
        py.allow_threads(|| self.inner.add_dictionary(name, &path))
            .map_err(config_error)
    }

    fn add_dictionary_base64(&self, py: Python<'_>, name: &str, text: &str) -> PyResult<()> {
        py.allow_threads(|| self.inner.add_dictionary_base64(name, text))
            .map_err(config_error)
    }

    fn add_dictionary_bytes(&self, py: Python<'_>, name: &str, raw: &[u8]) -> PyResult<()> {
        py.allow_threads(|| self.inner.add_dictionary_bytes(name, raw))
            .map_err(config_error)
    }

    /// Number of dictionaries detached.
    fn release_dictionaries(&self) -> usize {
        self.inner.release_dictionaries()
    }

    /// Registered dictionary names, sorted.
    fn dictionaries(&self) -> Vec<String> {
        self.inner.registry().names()
    }

    // --- Per-request calls ---

    fn compress<'py>(&self, py: Python<'py>, data: &[u8]) -> (Bound<'py, PyBytes>, i32) {
        let payload = py.allow_threads(|| self.inner.compress(data));
        bytes_result(py, payload)
    }

    fn decompress<'py>(&self, py: Python<'py>, data: &[u8]) -> (Bound<'py, PyBytes>, i32) {
        let payload = py.allow_threads(|| self.inner.decompress(data));
        bytes_result(py, payload)
    }

    fn compress_with_dictionary<'py>(
        &self,
        py: Python<'py>,
        data: &[u8],
        name: &str,
    ) -> (Bound<'py, PyBytes>, i32) {
        let payload = py.allow_threads(|| self.inner.compress_with_dictionary(data, name));
        bytes_result(py, payload)
    }

    fn decompress_with_dictionary<'py>(
        &self,
        py: Python<'py>,
        data: &[u8],
        name: &str,
    ) -> (Bound<'py, PyBytes>, i32) {
        let payload = py.allow_threads(|| self.inner.decompress_with_dictionary(data, name));
        bytes_result(py, payload)
    }

    fn compress_base64(&self, py: Python<'_>, text: &str) -> (String, i32) {
        text_result(py.allow_threads(|| self.inner.compress_base64(text)))
    }

    fn decompress_base64(&self, py: Python<'_>, text: &str) -> (String, i32) {
        text_result(py.allow_threads(|| self.inner.decompress_base64(text)))
    }

    fn compress_base64_with_dictionary(&self, py: Python<'_>, text: &str, name: &str) -> (String, i32) {
        text_result(py.allow_threads(|| self.inner.compress_base64_with_dictionary(text, name)))
    }

    fn decompress_base64_with_dictionary(&self, py: Python<'_>, text: &str, name: &str) -> (String, i32) {
        text_result(py.allow_threads(|| self.inner.decompress_base64_with_dictionary(text, name)))
    }

    fn __repr__(&self) -> String {
        format!(
            "Service(level={}, dictionaries={})",
            self.inner.codec().level(),
            self.inner.registry().len()
        )
    }
}

/// Send library logs to stderr. `filter` uses `RUST_LOG` syntax.
/// Calling it again after a subscriber is installed does nothing.
#[pyfunction]
#[pyo3(signature = (filter=None))]
fn init_logging(filter: Option<&str>) -> PyResult<()> {
    install_subscriber(filter).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn status_message(status: i32) -> &'static str {
    CallStatus::describe(status).to_str().unwrap_or_default()
}
