//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zdict_core::compression::{Codec, CodecError};

/// Raw-content dictionary built from a themed vocabulary.
pub fn raw_dictionary(theme: &str) -> Vec<u8> {
    let mut dict = String::new();
    for i in 0..64 {
        dict.push_str(&format!(
            "{{\"theme\":\"{theme}\",\"index\":{i},\"label\":\"{theme}-label-{i}\",\"note\":\"{theme} notes for entry {i}\"}}\n"
        ));
    }
    dict.into_bytes()
}

/// Payload that shares most of its content with `raw_dictionary(theme)`.
pub fn themed_payload(theme: &str) -> Vec<u8> {
    format!(
        "{{\"theme\":\"{theme}\",\"index\":17,\"label\":\"{theme}-label-17\",\"note\":\"{theme} notes for entry 17\"}}\n\
         {{\"theme\":\"{theme}\",\"index\":42,\"label\":\"{theme}-label-42\",\"note\":\"{theme} notes for entry 42\"}}\n"
    )
    .into_bytes()
}

/// Raw-content dictionary whose records differ from other fills only in
/// their last byte, so two fills have equal length and layout.
pub fn fill_dictionary(fill: char) -> Vec<u8> {
    (1..=64).map(|i| format!("record-{i:04}-{fill}\n")).collect::<String>().into_bytes()
}

/// Payload drawn from `fill_dictionary(fill)`.
pub fn fill_payload(fill: char) -> Vec<u8> {
    (1..=12).map(|i| format!("record-{i:04}-{fill}\n")).collect::<String>().into_bytes()
}

/// Write `raw` base64-encoded, wrapped at 76 columns like the `base64` CLI.
pub fn write_dictionary_file(dir: &Path, file_name: &str, raw: &[u8]) -> PathBuf {
    let encoded = STANDARD.encode(raw);
    let mut text = String::new();
    for chunk in encoded.as_bytes().chunks(76) {
        text.push_str(std::str::from_utf8(chunk).unwrap());
        text.push('\n');
    }
    let path = dir.join(file_name);
    std::fs::write(&path, text).unwrap();
    path
}

pub fn encode(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

// -----------------------------------------------------------------------------
// Instrumented codec
// -----------------------------------------------------------------------------

/// Shared counters observed by the tests.
#[derive(Default)]
pub struct Probe {
    /// Compiled forms currently alive.
    pub live_forms: AtomicIsize,
    /// Forms ever dropped.
    pub dropped_forms: AtomicUsize,
    /// Codec operations invoked (any of the four).
    pub codec_calls: AtomicUsize,
}

impl Probe {
    pub fn live(&self) -> isize {
        self.live_forms.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.codec_calls.load(Ordering::SeqCst)
    }
}

/// Compiled form that tracks its own lifetime.
pub struct ProbeForm {
    probe: Arc<Probe>,
    tag: u32,
    released: std::sync::atomic::AtomicBool,
}

impl ProbeForm {
    fn new(probe: &Arc<Probe>, raw: &[u8]) -> Self {
        probe.live_forms.fetch_add(1, Ordering::SeqCst);
        Self {
            probe: Arc::clone(probe),
            tag: crc32fast::hash(raw),
            released: std::sync::atomic::AtomicBool::new(false),
        }
    }

    fn assert_alive(&self) {
        assert!(!self.released.load(Ordering::SeqCst), "compiled form used after release");
        assert!(self.probe.live() > 0, "live form count went negative");
    }
}

impl Drop for ProbeForm {
    fn drop(&mut self) {
        assert!(!self.released.swap(true, Ordering::SeqCst), "compiled form released twice");
        self.probe.live_forms.fetch_sub(1, Ordering::SeqCst);
        self.probe.dropped_forms.fetch_add(1, Ordering::SeqCst);
    }
}

/// Trivial framing codec: `tag (u32 LE) || payload`. Tag 0 means no dictionary.
pub struct ProbeCodec {
    pub probe: Arc<Probe>,
    pub fail_decompressor: bool,
}

impl ProbeCodec {
    pub fn new() -> (Self, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (Self { probe: Arc::clone(&probe), fail_decompressor: false }, probe)
    }

    pub fn failing_decompressor() -> (Self, Arc<Probe>) {
        let (mut codec, probe) = Self::new();
        codec.fail_decompressor = true;
        (codec, probe)
    }

    fn frame(tag: u32, input: &[u8]) -> Vec<u8> {
        let mut out = tag.to_le_bytes().to_vec();
        out.extend_from_slice(input);
        out
    }

    fn unframe(expected: u32, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.len() < 4 {
            return Err(CodecError::CorruptFrame("short frame".into()));
        }
        let found = u32::from_le_bytes(input[..4].try_into().unwrap());
        if found != expected {
            return Err(CodecError::DictionaryMismatch { expected: Some(expected), found });
        }
        Ok(input[4..].to_vec())
    }
}

impl Codec for ProbeCodec {
    type CompressorForm = ProbeForm;
    type DecompressorForm = ProbeForm;

    fn name(&self) -> &'static str {
        "probe"
    }

    fn compile_compressor(&self, raw: &[u8]) -> Result<ProbeForm, CodecError> {
        Ok(ProbeForm::new(&self.probe, raw))
    }

    fn compile_decompressor(&self, raw: &[u8]) -> Result<ProbeForm, CodecError> {
        if self.fail_decompressor {
            return Err(CodecError::InvalidDictionary("probe refuses decompressor".into()));
        }
        Ok(ProbeForm::new(&self.probe, raw))
    }

    fn dictionary_id(&self, form: &ProbeForm) -> Option<u32> {
        Some(form.tag)
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.probe.codec_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::frame(0, input))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.probe.codec_calls.fetch_add(1, Ordering::SeqCst);
        Self::unframe(0, input)
    }

    fn compress_with_dictionary(&self, input: &[u8], form: &ProbeForm) -> Result<Vec<u8>, CodecError> {
        self.probe.codec_calls.fetch_add(1, Ordering::SeqCst);
        form.assert_alive();
        Ok(Self::frame(form.tag, input))
    }

    fn decompress_with_dictionary(&self, input: &[u8], form: &ProbeForm) -> Result<Vec<u8>, CodecError> {
        self.probe.codec_calls.fetch_add(1, Ordering::SeqCst);
        form.assert_alive();
        Self::unframe(form.tag, input)
    }
}
