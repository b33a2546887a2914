//! Per-chunk synthesis and audio file output.
//!
//! Speech endpoints cap input length, so the Tamil output is chunked and
//! each chunk synthesized separately.  A chunk that fails is logged and
//! left out; the rest are concatenated byte-wise, which yields a playable
//! stream for frame-based containers such as MP3.

use std::path::Path;

use crate::speech::{SpeechError, SpeechSynthesizer};

/// Audio produced for one request.
#[derive(Debug, Clone, Default)]
pub struct SpeechOutput {
    /// Concatenated encoded audio of every successful chunk.
    pub audio: Vec<u8>,
    pub chunks_ok: usize,
    pub chunks_failed: usize,
}

impl SpeechOutput {
    /// `true` when at least one chunk was dropped.
    pub fn is_partial(&self) -> bool {
        self.chunks_failed > 0
    }
}

/// Synthesize `chunks` in order, dropping the ones that fail.
///
/// # Errors
///
/// [`SpeechError::NoAudio`] when no chunk produced audio (including an empty
/// chunk list).
pub async fn synthesize_chunks(
    synth: &dyn SpeechSynthesizer,
    chunks: &[String],
    language: &str,
) -> Result<SpeechOutput, SpeechError> {
    let mut output = SpeechOutput::default();

    for (idx, chunk) in chunks.iter().enumerate() {
        match synth.synthesize(chunk, language).await {
            Ok(bytes) => {
                log::debug!(
                    "speech: chunk {}/{} -> {} bytes",
                    idx + 1,
                    chunks.len(),
                    bytes.len()
                );
                output.audio.extend_from_slice(&bytes);
                output.chunks_ok += 1;
            }
            Err(e) => {
                log::warn!("speech: dropping chunk {}/{}: {e}", idx + 1, chunks.len());
                output.chunks_failed += 1;
            }
        }
    }

    if output.chunks_ok == 0 {
        return Err(SpeechError::NoAudio {
            failed: output.chunks_failed,
        });
    }
    Ok(output)
}

/// Write `audio` to `path`, creating parent directories as needed.
pub fn write_audio(path: &Path, audio: &[u8]) -> Result<(), SpeechError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, audio)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
