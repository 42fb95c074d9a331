//! compression/dictionary.rs
//! Compiled dictionary: both codec forms derived from one set of raw bytes.

use std::fmt;

use crate::compression::codecs::ZstdCodec;
use crate::compression::constants::dict_id_label;
use crate::compression::types::{Codec, CodecError};
use crate::constants::{MAX_DICT_LEN, MIN_DICT_LEN};

/// Compressor and decompressor forms for one dictionary name.
///
/// Both forms live and die with this value. Handles are shared as
/// `Arc<CompiledDictionary>`, so a form stays valid for as long as any
/// in-flight call holds the handle.
pub struct CompiledDictionary<K: Codec = ZstdCodec> {
    name: String,
    raw_len: usize,
    dict_id: Option<u32>,
    compressor: K::CompressorForm,
    decompressor: K::DecompressorForm,
}

impl<K: Codec> CompiledDictionary<K> {
    /// Validate `raw` and compile both forms.
    ///
    /// # Errors
    /// - `CodecError::InvalidDictionary` if the bytes are out of bounds or either
    ///   form fails to compile. A compressor form compiled before the failure is
    ///   dropped here, so nothing partial escapes.
    pub fn compile(codec: &K, name: &str, raw: &[u8]) -> Result<Self, CodecError> {
        validate_raw_dictionary(raw)?;

        let compressor = codec.compile_compressor(raw)?;
        let decompressor = codec.compile_decompressor(raw)?;
        let dict_id = codec.dictionary_id(&decompressor);

        Ok(Self {
            name: name.to_owned(),
            raw_len: raw.len(),
            dict_id,
            compressor,
            decompressor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn dict_id(&self) -> Option<u32> {
        self.dict_id
    }

    pub fn compressor(&self) -> &K::CompressorForm {
        &self.compressor
    }

    pub fn decompressor(&self) -> &K::DecompressorForm {
        &self.decompressor
    }
}

impl<K: Codec> fmt::Debug for CompiledDictionary<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledDictionary")
            .field("name", &self.name)
            .field("raw_len", &self.raw_len)
            .field("dict_id", &dict_id_label(self.dict_id))
            .finish()
    }
}

/// Bounds check on raw dictionary bytes before handing them to the codec.
pub fn validate_raw_dictionary(raw: &[u8]) -> Result<(), CodecError> {
    if raw.len() < MIN_DICT_LEN {
        return Err(CodecError::InvalidDictionary(format!(
            "dictionary too short: {} < {}",
            raw.len(),
            MIN_DICT_LEN
        )));
    }
    if raw.len() > MAX_DICT_LEN {
        return Err(CodecError::InvalidDictionary(format!(
            "dictionary too large: {} > {}",
            raw.len(),
            MAX_DICT_LEN
        )));
    }
    Ok(())
}
