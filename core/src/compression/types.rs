//! compression/types.rs
//! Codec seam and codec/registry error types.

/// Errors produced by a codec. They never cross the boundary; the boundary
/// layer converts them into call statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Input is not a valid frame (empty, truncated, garbage, checksum failure).
    #[error("corrupt frame: {0}")]
    CorruptFrame(String),

    /// Frame was written with a dictionary other than the one supplied.
    #[error("dictionary mismatch: frame expects dictionary id {found:#010x}, compiled dictionary has id {expected:?}")]
    DictionaryMismatch { expected: Option<u32>, found: u32 },

    /// Raw dictionary bytes could not be compiled.
    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// Decompressed output would exceed the configured cap.
    #[error("decompressed output exceeds {limit} bytes")]
    OutputTooLarge { limit: usize },

    /// Context creation or parameter setup failed.
    #[error("codec {codec} context error: {msg}")]
    Context { codec: &'static str, msg: String },
}

/// Errors returned by `DictionaryRegistry::add`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("dictionary name must not be empty")]
    InvalidName,

    #[error("invalid dictionary data for '{name}': {source}")]
    InvalidDictionaryData {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// The codec capability consumed by the registry and the boundary layer.
///
/// Compiled forms are immutable once created and shared across threads.
pub trait Codec: Send + Sync + 'static {
    /// Compiled compressor-side dictionary.
    type CompressorForm: Send + Sync + 'static;
    /// Compiled decompressor-side dictionary.
    type DecompressorForm: Send + Sync + 'static;

    fn name(&self) -> &'static str;

    fn compile_compressor(&self, raw: &[u8]) -> Result<Self::CompressorForm, CodecError>;
    fn compile_decompressor(&self, raw: &[u8]) -> Result<Self::DecompressorForm, CodecError>;

    /// Dictionary id recorded in frames written with this form, if any.
    fn dictionary_id(&self, _form: &Self::DecompressorForm) -> Option<u32> {
        None
    }

    /// Compress without a dictionary. Empty input yields a valid minimal frame.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Decompress a frame written without a dictionary.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    fn compress_with_dictionary(
        &self,
        input: &[u8],
        form: &Self::CompressorForm,
    ) -> Result<Vec<u8>, CodecError>;

    fn decompress_with_dictionary(
        &self,
        input: &[u8],
        form: &Self::DecompressorForm,
    ) -> Result<Vec<u8>, CodecError>;
}
