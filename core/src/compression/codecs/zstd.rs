//! src/compression/codecs/zstd.rs
//!
//! Zstd adapter.
//!
//! Design notes:
//! - Plain frames go through the `zstd` bulk compressor and streaming decoder,
//!   so concatenated frames and frames without a recorded size decode fine.
//! - Dictionary input may also hold concatenated frames; each must record its
//!   content size so the output cap is checked before allocating.
//! - Dictionary frames use `CDict`/`DDict` compiled once per dictionary and
//!   referenced by a fresh context per call; contexts are never shared.
//! - Dictionary frames always carry a content checksum; `checksum` only
//!   governs plain frames. A raw-content dictionary leaves no id in the
//!   frame, so the checksum is what turns a decode with the wrong dictionary
//!   into an error instead of wrong output.
//! - Errors are mapped into `CodecError` variants; nothing here panics.

use std::io::Read;

use zstd_safe::{CCtx, CDict, CParameter, DCtx, DDict};

use crate::compression::constants::codec_names;
use crate::compression::types::{Codec, CodecError};
use crate::constants::{DEFAULT_LEVEL, DEFAULT_MAX_OUTPUT_SIZE};

/// Compressor-side compiled dictionary.
pub struct ZstdCompressorForm {
    cdict: CDict<'static>,
}

/// Decompressor-side compiled dictionary.
pub struct ZstdDecompressorForm {
    ddict: DDict<'static>,
    dict_id: Option<u32>,
}

/// Zstd codec with a fixed level, checksum policy and output cap.
#[derive(Debug, Clone)]
pub struct ZstdCodec {
    level: i32,
    checksum: bool,
    max_output_size: usize,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            checksum: true,
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
        }
    }
}

impl ZstdCodec {
    /// Create a codec at `level`.
    ///
    /// # Errors
    /// - `CodecError::Context` if the level is outside zstd's supported range.
    pub fn new(level: i32) -> Result<Self, CodecError> {
        let range = zstd::compression_level_range();
        if !range.contains(&level) {
            return Err(CodecError::Context {
                codec: codec_names::ZSTD,
                msg: format!(
                    "compression level {} outside {}..={}",
                    level,
                    range.start(),
                    range.end()
                ),
            });
        }
        Ok(Self { level, ..Self::default() })
    }

    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_max_output_size(mut self, max_output_size: usize) -> Self {
        self.max_output_size = max_output_size;
        self
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn checksum(&self) -> bool {
        self.checksum
    }

    pub fn max_output_size(&self) -> usize {
        self.max_output_size
    }
}

fn context_error(msg: impl ToString) -> CodecError {
    CodecError::Context {
        codec: codec_names::ZSTD,
        msg: msg.to_string(),
    }
}

fn code_name(code: usize) -> String {
    zstd_safe::get_error_name(code).to_string()
}

impl Codec for ZstdCodec {
    type CompressorForm = ZstdCompressorForm;
    type DecompressorForm = ZstdDecompressorForm;

    fn name(&self) -> &'static str {
        codec_names::ZSTD
    }

    fn compile_compressor(&self, raw: &[u8]) -> Result<ZstdCompressorForm, CodecError> {
        let cdict = CDict::try_create(raw, self.level).ok_or_else(|| {
            CodecError::InvalidDictionary("zstd could not build a compression dictionary".into())
        })?;
        Ok(ZstdCompressorForm { cdict })
    }

    fn compile_decompressor(&self, raw: &[u8]) -> Result<ZstdDecompressorForm, CodecError> {
        let ddict = DDict::try_create(raw).ok_or_else(|| {
            CodecError::InvalidDictionary("zstd could not build a decompression dictionary".into())
        })?;
        let dict_id = zstd_safe::get_dict_id_from_dict(raw).map(u32::from);
        Ok(ZstdDecompressorForm { ddict, dict_id })
    }

    fn dictionary_id(&self, form: &ZstdDecompressorForm) -> Option<u32> {
        form.dict_id
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut compressor = zstd::bulk::Compressor::new(self.level).map_err(context_error)?;
        compressor.include_checksum(self.checksum).map_err(context_error)?;
        compressor.compress(input).map_err(context_error)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Err(CodecError::CorruptFrame("empty input".into()));
        }

        let decoder = zstd::stream::read::Decoder::with_buffer(input)
            .map_err(|e| CodecError::CorruptFrame(e.to_string()))?;

        // Read one byte past the cap so an oversized payload is detected, not truncated.
        let mut out = Vec::new();
        decoder
            .take(self.max_output_size as u64 + 1)
            .read_to_end(&mut out)
            .map_err(|e| CodecError::CorruptFrame(e.to_string()))?;

        if out.len() > self.max_output_size {
            return Err(CodecError::OutputTooLarge { limit: self.max_output_size });
        }
        Ok(out)
    }

    fn compress_with_dictionary(
        &self,
        input: &[u8],
        form: &ZstdCompressorForm,
    ) -> Result<Vec<u8>, CodecError> {
        let mut cctx = CCtx::create();
        cctx.ref_cdict(&form.cdict).map_err(code_name).map_err(context_error)?;
        cctx.set_parameter(CParameter::ChecksumFlag(true))
            .map_err(code_name)
            .map_err(context_error)?;

        let mut out = Vec::with_capacity(zstd_safe::compress_bound(input.len()));
        cctx.compress2(&mut out, input).map_err(code_name).map_err(context_error)?;
        Ok(out)
    }

    fn decompress_with_dictionary(
        &self,
        input: &[u8],
        form: &ZstdDecompressorForm,
    ) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Err(CodecError::CorruptFrame("empty input".into()));
        }

        let mut dctx = DCtx::create();
        dctx.ref_ddict(&form.ddict).map_err(code_name).map_err(context_error)?;

        // Frames are decoded one at a time, like the streaming plain path.
        let mut out = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let frame_len = zstd_safe::find_frame_compressed_size(rest)
                .map_err(|code| CodecError::CorruptFrame(code_name(code)))?;
            if frame_len == 0 || frame_len > rest.len() {
                return Err(CodecError::CorruptFrame("frame size out of range".into()));
            }
            let (frame, tail) = rest.split_at(frame_len);
            rest = tail;

            // A frame that names its dictionary must name this one.
            if let Some(found) = zstd_safe::get_dict_id_from_frame(frame).map(u32::from) {
                if form.dict_id != Some(found) {
                    return Err(CodecError::DictionaryMismatch {
                        expected: form.dict_id,
                        found,
                    });
                }
            }

            let content_size = match zstd_safe::get_frame_content_size(frame) {
                Ok(Some(size)) => size,
                Ok(None) => {
                    return Err(CodecError::CorruptFrame(
                        "frame does not record its content size".into(),
                    ))
                }
                Err(_) => return Err(CodecError::CorruptFrame("not a zstd frame".into())),
            };
            if out.len() as u64 + content_size > self.max_output_size as u64 {
                return Err(CodecError::OutputTooLarge { limit: self.max_output_size });
            }

            let mut decoded = Vec::with_capacity(content_size as usize);
            dctx.decompress(&mut decoded, frame)
                .map_err(|code| CodecError::CorruptFrame(code_name(code)))?;
            out.extend_from_slice(&decoded);
        }
        Ok(out)
    }
}
