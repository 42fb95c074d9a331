//! compression/registry.rs
//! Name-keyed store of compiled dictionaries.
//!
//! Notes:
//! - Compilation happens outside the lock; the write lock only covers the map swap.
//! - Lookups clone an `Arc` under a read lock. The handle keeps both forms alive
//!   for the whole codec call, even if `release_all` or a replacing `add` runs
//!   concurrently.
//! - Detached entries are dropped after the lock is released.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::compression::codecs::ZstdCodec;
use crate::compression::constants::dict_id_label;
use crate::compression::dictionary::CompiledDictionary;
use crate::compression::types::{Codec, RegistryError};

pub struct DictionaryRegistry<K: Codec = ZstdCodec> {
    codec: Arc<K>,
    entries: RwLock<HashMap<String, Arc<CompiledDictionary<K>>>>,
}

impl<K: Codec> DictionaryRegistry<K> {
    pub fn new(codec: Arc<K>) -> Self {
        Self {
            codec,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Codec used to compile dictionaries for this registry.
    pub fn codec(&self) -> &Arc<K> {
        &self.codec
    }

    /// Compile `raw` and register it under `name`, replacing any previous entry.
    ///
    /// # Errors
    /// - `RegistryError::InvalidName` for an empty name.
    /// - `RegistryError::InvalidDictionaryData` if either form fails to compile;
    ///   the registry is left untouched.
    pub fn add(&self, name: &str, raw: &[u8]) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidName);
        }

        let compiled = CompiledDictionary::compile(self.codec.as_ref(), name, raw).map_err(|source| {
            RegistryError::InvalidDictionaryData {
                name: name.to_owned(),
                source,
            }
        })?;
        let dict_id = compiled.dict_id();

        let previous = self.entries.write().insert(name.to_owned(), Arc::new(compiled));

        info!(
            codec = self.codec.name(),
            dictionary = name,
            raw_len = raw.len(),
            dict_id = %dict_id_label(dict_id),
            replaced = previous.is_some(),
            "dictionary registered"
        );
        drop(previous);
        Ok(())
    }

    /// Handle to the compiled forms registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<CompiledDictionary<K>>> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Detach every entry and return how many were detached.
    ///
    /// Forms still held by in-flight calls are freed when those calls drop
    /// their handles. Calling this on an empty registry is a no-op.
    pub fn release_all(&self) -> usize {
        let detached = std::mem::take(&mut *self.entries.write());
        let count = detached.len();
        let in_use = detached.values().filter(|d| Arc::strong_count(d) > 1).count();
        drop(detached);

        if count > 0 {
            info!(codec = self.codec.name(), count, in_use, "dictionaries released");
        } else {
            debug!(codec = self.codec.name(), "release on empty registry");
        }
        count
    }
}

impl Default for DictionaryRegistry<ZstdCodec> {
    fn default() -> Self {
        Self::new(Arc::new(ZstdCodec::default()))
    }
}
