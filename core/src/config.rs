//! config.rs
//! Service configuration: codec parameters, initial debug state and the
//! dictionaries to load at start-up.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compression::{CodecError, ZstdCodec};
use crate::constants::{DEFAULT_LEVEL, DEFAULT_MAX_OUTPUT_SIZE};
use crate::types::ConfigurationError;

/// One dictionary to register when the service is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySource {
    pub name: String,
    /// File holding the base64-encoded dictionary.
    pub path: PathBuf,
}

/// Service configuration.
/// - Every field is optional in JSON; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// zstd compression level, also used when compiling compressor dictionaries.
    pub level: i32,
    /// Write content checksums into plain frames. Dictionary frames always
    /// carry one.
    pub checksum: bool,
    /// Cap on decompressed payload size, in bytes.
    pub max_output_size: usize,
    /// Initial state of the debug flag.
    pub debug: bool,
    pub dictionaries: Vec<DictionarySource>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            checksum: true,
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
            debug: false,
            dictionaries: Vec::new(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        Self::from_json_bytes(text.as_bytes())
    }

    fn from_json_bytes(bytes: &[u8]) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_slice(bytes)
            .map_err(|e| ConfigurationError::Config(format!("invalid configuration JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigurationError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_bytes(&bytes)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_output_size == 0 {
            return Err(ConfigurationError::Config("max_output_size must be > 0".into()));
        }
        self.codec()?;

        for (i, source) in self.dictionaries.iter().enumerate() {
            if source.name.is_empty() {
                return Err(ConfigurationError::Config(format!("dictionaries[{i}]: empty name")));
            }
            if self.dictionaries[..i].iter().any(|d| d.name == source.name) {
                return Err(ConfigurationError::Config(format!(
                    "dictionaries[{i}]: duplicate name '{}'",
                    source.name
                )));
            }
        }
        Ok(())
    }

    /// Build the zstd codec described by this configuration.
    pub fn codec(&self) -> Result<ZstdCodec, ConfigurationError> {
        let codec = ZstdCodec::new(self.level).map_err(|e| match e {
            CodecError::Context { msg, .. } => ConfigurationError::Config(msg),
            other => ConfigurationError::Config(other.to_string()),
        })?;
        Ok(codec
            .with_checksum(self.checksum)
            .with_max_output_size(self.max_output_size))
    }
}
