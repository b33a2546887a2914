//! Speech synthesis of the translated Tamil.
//!
//! * [`SpeechSynthesizer`]: async trait implemented by synthesis backends.
//! * [`ApiSynthesizer`]: OpenAI-compatible `/v1/audio/speech` client.
//! * [`synthesize_chunks`]: one call per chunk; failed chunks are dropped.
//! * [`write_audio`]: persist the concatenated audio.

pub mod api;
pub mod batch;

use async_trait::async_trait;
use thiserror::Error;

pub use api::ApiSynthesizer;
pub use batch::{synthesize_chunks, write_audio, SpeechOutput};

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors raised by speech synthesis.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// HTTP transport or connection error.
    #[error("speech request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("speech service returned HTTP {0}")]
    Status(u16),

    /// The service returned zero bytes of audio.
    #[error("speech service returned no audio")]
    EmptyAudio,

    /// Every chunk failed, so there is nothing to write.
    #[error("no audio produced ({failed} chunk(s) failed)")]
    NoAudio { failed: usize },

    /// Writing the audio file failed.
    #[error("cannot write audio file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async trait for text-to-speech backends.
///
/// Returns encoded audio bytes in the backend's configured container
/// (see [`SpeechSynthesizer::file_extension`]).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;

    /// Extension for files holding this backend's output, without the dot.
    fn file_extension(&self) -> &str;
}
