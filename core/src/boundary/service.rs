//! boundary/service.rs
//! `CompressionService`: one registry, one debug flag, one set of counters.
//!
//! Call sequence for every per-request operation:
//! 1. (bindings) validate foreign arguments
//! 2. resolve the dictionary, short-circuit with `MissingDictionary`
//! 3. run the codec
//! 4. absorb codec errors into a status plus sentinel
//! 5. hand the result bytes back by value
//! 6. record telemetry, trace if the debug flag is set

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::boundary::trace::{trace_call, DebugFlag};
use crate::boundary::types::{CallStatus, EncodedPayload, Operation, Payload};
use crate::compression::{Codec, CodecError, CompiledDictionary, DictionaryRegistry, ZstdCodec};
use crate::config::ServiceConfig;
use crate::telemetry::{ServiceCounters, TelemetrySnapshot};
use crate::types::ConfigurationError;
use crate::utils::decode_base64_text;

pub struct CompressionService<K: Codec = ZstdCodec> {
    registry: Arc<DictionaryRegistry<K>>,
    debug: DebugFlag,
    counters: ServiceCounters,
}

impl CompressionService<ZstdCodec> {
    /// Service with default codec settings and an empty registry.
    pub fn new() -> Self {
        Self::from_registry(Arc::new(DictionaryRegistry::default()))
    }

    /// Build a service from configuration and register its dictionaries.
    ///
    /// # Errors
    /// - `ConfigurationError` if the configuration is invalid or any listed
    ///   dictionary cannot be loaded.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let codec = config.codec()?;
        let service = Self::from_registry(Arc::new(DictionaryRegistry::new(Arc::new(codec))));
        service.set_debug(config.debug);

        for source in &config.dictionaries {
            service.add_dictionary(&source.name, &source.path)?;
        }
        Ok(service)
    }
}

impl Default for CompressionService<ZstdCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Codec> CompressionService<K> {
    /// Service over an existing registry. Several services may share one.
    pub fn from_registry(registry: Arc<DictionaryRegistry<K>>) -> Self {
        Self {
            registry,
            debug: DebugFlag::default(),
            counters: ServiceCounters::new(),
        }
    }

    pub fn registry(&self) -> &Arc<DictionaryRegistry<K>> {
        &self.registry
    }

    pub fn codec(&self) -> &K {
        self.registry.codec().as_ref()
    }

    // -------------------------------------------------------------------------
    // Debug flag
    // -------------------------------------------------------------------------

    pub fn set_debug(&self, enabled: bool) {
        self.debug.set(enabled);
    }

    pub fn enable_debug(&self) {
        self.set_debug(true);
    }

    pub fn disable_debug(&self) {
        self.set_debug(false);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.enabled()
    }

    // -------------------------------------------------------------------------
    // Administrative operations
    // -------------------------------------------------------------------------

    /// Read a base64 dictionary file and register it under `name`.
    pub fn add_dictionary(&self, name: &str, path: impl AsRef<Path>) -> Result<(), ConfigurationError> {
        let path = path.as_ref();
        let outcome = std::fs::read(path)
            .map_err(|source| ConfigurationError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| self.register_base64(name, &text));

        if outcome.is_ok() {
            info!(dictionary = name, path = %path.display(), "loaded dictionary file");
        }
        self.finish_admin("add_dictionary", name, outcome)
    }

    /// Register a dictionary from base64 text already in memory.
    pub fn add_dictionary_base64(&self, name: &str, text: &str) -> Result<(), ConfigurationError> {
        let outcome = self.register_base64(name, text.as_bytes());
        self.finish_admin("add_dictionary_base64", name, outcome)
    }

    /// Register a dictionary from raw bytes.
    pub fn add_dictionary_bytes(&self, name: &str, raw: &[u8]) -> Result<(), ConfigurationError> {
        let outcome = self.registry.add(name, raw).map_err(ConfigurationError::from);
        self.finish_admin("add_dictionary_bytes", name, outcome)
    }

    /// Detach every registered dictionary. Never fails; returns the count.
    pub fn release_dictionaries(&self) -> usize {
        let count = self.registry.release_all();
        self.counters.record_dictionaries_released(count);
        count
    }

    fn register_base64(&self, name: &str, text: &[u8]) -> Result<(), ConfigurationError> {
        let raw = decode_base64_text(text).map_err(|source| ConfigurationError::Encoding {
            name: name.to_owned(),
            source,
        })?;
        self.registry.add(name, &raw)?;
        Ok(())
    }

    fn finish_admin(
        &self,
        op: &'static str,
        name: &str,
        outcome: Result<(), ConfigurationError>,
    ) -> Result<(), ConfigurationError> {
        match &outcome {
            Ok(()) => self.counters.record_dictionary_added(),
            Err(e) => {
                self.counters.record_configuration_error();
                error!(op, dictionary = name, error = %e, "dictionary configuration failed");
            }
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Per-request operations (raw bytes)
    // -------------------------------------------------------------------------

    pub fn compress(&self, input: &[u8]) -> Payload {
        let op = Operation::Compress;
        let payload = self.absorb(op, None, input, self.codec().compress(input));
        self.finish(op, None, input, payload)
    }

    pub fn decompress(&self, input: &[u8]) -> Payload {
        let op = Operation::Decompress;
        let payload = self.absorb(op, None, input, self.codec().decompress(input));
        self.finish(op, None, input, payload)
    }

    pub fn compress_with_dictionary(&self, input: &[u8], name: &str) -> Payload {
        self.with_dictionary(Operation::CompressWithDictionary, name, input, |codec, dict| {
            codec.compress_with_dictionary(input, dict.compressor())
        })
    }

    pub fn decompress_with_dictionary(&self, input: &[u8], name: &str) -> Payload {
        self.with_dictionary(Operation::DecompressWithDictionary, name, input, |codec, dict| {
            codec.decompress_with_dictionary(input, dict.decompressor())
        })
    }

    // -------------------------------------------------------------------------
    // Per-request operations (base64 text)
    // -------------------------------------------------------------------------

    pub fn compress_base64(&self, text: &str) -> EncodedPayload {
        self.with_base64(Operation::Compress, None, text, |input| self.compress(input))
    }

    pub fn decompress_base64(&self, text: &str) -> EncodedPayload {
        self.with_base64(Operation::Decompress, None, text, |input| self.decompress(input))
    }

    pub fn compress_base64_with_dictionary(&self, text: &str, name: &str) -> EncodedPayload {
        self.with_base64(Operation::CompressWithDictionary, Some(name), text, |input| {
            self.compress_with_dictionary(input, name)
        })
    }

    pub fn decompress_base64_with_dictionary(&self, text: &str, name: &str) -> EncodedPayload {
        self.with_base64(Operation::DecompressWithDictionary, Some(name), text, |input| {
            self.decompress_with_dictionary(input, name)
        })
    }

    /// Failure result for arguments the bindings could not marshal
    /// (null pointers, non UTF-8 names). Recorded like any other call.
    pub fn reject(&self, op: Operation, dictionary: Option<&str>, reason: &str) -> Payload {
        warn!(op = op.name(), dictionary = dictionary.unwrap_or("-"), reason, "invalid argument");
        self.finish(op, dictionary, &[], Payload::failure(op, CallStatus::InvalidArgument))
    }

    pub fn stats(&self) -> TelemetrySnapshot {
        self.counters.snapshot(self.registry.len())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn with_dictionary<F>(&self, op: Operation, name: &str, input: &[u8], run: F) -> Payload
    where
        F: FnOnce(&K, &CompiledDictionary<K>) -> Result<Vec<u8>, CodecError>,
    {
        let payload = match self.registry.lookup(name) {
            Some(dict) => {
                // `dict` keeps both forms alive until the codec returns.
                let result = run(self.codec(), &dict);
                self.absorb(op, Some(name), input, result)
            }
            None => {
                warn!(op = op.name(), dictionary = name, input_len = input.len(), "missing dictionary, please init first");
                Payload::failure(op, CallStatus::MissingDictionary)
            }
        };
        self.finish(op, Some(name), input, payload)
    }

    fn with_base64<F>(&self, op: Operation, dictionary: Option<&str>, text: &str, run: F) -> EncodedPayload
    where
        F: FnOnce(&[u8]) -> Payload,
    {
        match decode_base64_text(text) {
            Ok(input) => run(&input).into_base64(),
            Err(e) => self.reject(op, dictionary, &e.to_string()).into_base64(),
        }
    }

    fn absorb(
        &self,
        op: Operation,
        dictionary: Option<&str>,
        input: &[u8],
        result: Result<Vec<u8>, CodecError>,
    ) -> Payload {
        match result {
            Ok(data) => Payload::success(data),
            Err(e) => {
                warn!(
                    op = op.name(),
                    dictionary = dictionary.unwrap_or("-"),
                    input_len = input.len(),
                    error = %e,
                    "codec call failed"
                );
                Payload::failure(op, CallStatus::from(&e))
            }
        }
    }

    fn finish(&self, op: Operation, dictionary: Option<&str>, input: &[u8], payload: Payload) -> Payload {
        self.counters
            .record_call(op, payload.status(), input.len(), payload.data().len());
        trace_call(&self.debug, op, dictionary, input, &payload);
        payload
    }
}
