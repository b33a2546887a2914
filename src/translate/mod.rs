//! Translation backends.
//!
//! This module provides:
//! * [`Translator`]: async trait implemented by every backend.
//! * [`DictionaryTranslator`]: offline word table (no network).
//! * [`HttpApiTranslator`]: public HTTP translation API.
//! * [`LlmTranslator`]: OpenAI-compatible chat-completions rewrite.
//! * [`Seq2SeqTranslator`]: locally served NLLB / IndicTrans2 model.
//! * [`FallbackTranslator`]: primary backend with a secondary on failure.
//! * [`create_translator`]: builds the configured backend.
//! * [`translate_chunks`] / [`translate_paragraphs`]: translate pre-chunked
//!   text in order.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tamil_translator::config::AppConfig;
//! use tamil_translator::text::{chunk_sentences, segment_sentences, ChunkLimits};
//! use tamil_translator::translate::{create_translator, translate_chunks};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let translator = create_translator(&config.translator);
//!
//!     let sentences = segment_sentences("Good morning. Thank you.");
//!     let chunks = chunk_sentences(&sentences, ChunkLimits::from(&config.chunking));
//!     let tamil = translate_chunks(translator.as_ref(), &chunks, "en").await.unwrap();
//!     println!("{tamil}");
//! }
//! ```

pub mod dictionary;
pub mod fallback;
pub mod http_api;
pub mod llm;
pub mod prompt;
pub mod seq2seq;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{TranslatorBackend, TranslatorConfig};

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use dictionary::DictionaryTranslator;
pub use fallback::FallbackTranslator;
pub use http_api::HttpApiTranslator;
pub use llm::LlmTranslator;
pub use prompt::PromptBuilder;
pub use seq2seq::{nllb_code, Seq2SeqTranslator};

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur while translating a chunk.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("translation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The service returned no usable text.
    #[error("translation service returned an empty response")]
    EmptyResponse,

    /// The backend cannot handle this source language.
    #[error("unsupported source language: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

/// Turn a non-success HTTP response into [`TranslateError::Status`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, TranslateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TranslateError::Status {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for anything that turns a chunk of source text into Tamil.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn Translator>`).
///
/// # Arguments
/// * `text`        – One chunk of source text (one or more sentences).
/// * `source_lang` – ISO-639-1 code of the source, or `"und"` when unknown.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError>;

    /// Short backend name for logs and the UI.
    fn name(&self) -> &str;

    /// Separator placed between translated chunks.
    fn chunk_separator(&self) -> &str {
        " "
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build the backend selected in `config`.
///
/// When `fallback_to_dictionary` is set, network backends are wrapped in a
/// [`FallbackTranslator`] whose secondary is the offline dictionary.
pub fn create_translator(config: &TranslatorConfig) -> Arc<dyn Translator> {
    let primary: Arc<dyn Translator> = match config.backend {
        TranslatorBackend::Dictionary => {
            log::info!("translate: using offline dictionary backend");
            return Arc::new(DictionaryTranslator::new());
        }
        TranslatorBackend::HttpApi => Arc::new(HttpApiTranslator::from_config(
            &config.http,
            &config.target_language,
        )),
        TranslatorBackend::Llm => Arc::new(LlmTranslator::from_config(
            &config.llm,
            &config.target_language,
        )),
        TranslatorBackend::Seq2Seq => Arc::new(Seq2SeqTranslator::from_config(
            &config.seq2seq,
            &config.target_language,
        )),
    };

    if config.fallback_to_dictionary {
        log::info!(
            "translate: using {} with dictionary fallback",
            primary.name()
        );
        Arc::new(FallbackTranslator::new(
            primary,
            Arc::new(DictionaryTranslator::new()),
        ))
    } else {
        log::info!("translate: using {}", primary.name());
        primary
    }
}

// ---------------------------------------------------------------------------
// translate_chunks
// ---------------------------------------------------------------------------

/// Translate `chunks` one after another and join the results.
///
/// The first failing chunk aborts the whole request; partial output is
/// discarded.  Chunks that translate to nothing are skipped.  Each join uses
/// the separator reported right after the preceding chunk, so a fallback
/// backend that answered only some chunks still joins its own output its own
/// way.
pub async fn translate_chunks(
    translator: &dyn Translator,
    chunks: &[String],
    source_lang: &str,
) -> Result<String, TranslateError> {
    let mut out = String::new();
    let mut separator = String::new();

    for (idx, chunk) in chunks.iter().enumerate() {
        log::debug!(
            "translate: chunk {}/{} ({} chars) via {}",
            idx + 1,
            chunks.len(),
            chunk.chars().count(),
            translator.name()
        );
        let translated = translator.translate(chunk, source_lang).await?;
        let translated = translated.trim();
        if translated.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(&separator);
        }
        out.push_str(translated);
        separator = translator.chunk_separator().to_string();
    }

    Ok(out)
}

/// Translate each paragraph's chunks and join paragraphs with a blank line.
///
/// Paragraphs that translate to nothing are dropped.
pub async fn translate_paragraphs(
    translator: &dyn Translator,
    paragraphs: &[Vec<String>],
    source_lang: &str,
) -> Result<String, TranslateError> {
    let mut parts = Vec::with_capacity(paragraphs.len());
    for chunks in paragraphs {
        let translated = translate_chunks(translator, chunks, source_lang).await?;
        if !translated.is_empty() {
            parts.push(translated);
        }
    }
    Ok(parts.join("\n\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every chunk it sees and echoes it back tagged.
    struct Recording {
        seen: Mutex<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl Recording {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl Translator for Recording {
        async fn translate(&self, text: &str, _src: &str) -> Result<String, TranslateError> {
            let mut seen = self.seen.lock().unwrap();
            if self.fail_on == Some(seen.len()) {
                return Err(TranslateError::Timeout);
            }
            seen.push(text.to_string());
            Ok(format!("<{text}>"))
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn chunks_are_translated_in_order() {
        let t = Recording::new(None);
        let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let out = translate_chunks(&t, &chunks, "en").await.unwrap();
        assert_eq!(out, "<a> <b> <c>");
        assert_eq!(*t.seen.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn first_failure_aborts() {
        let t = Recording::new(Some(1));
        let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = translate_chunks(&t, &chunks, "en").await.unwrap_err();
        assert!(matches!(err, TranslateError::Timeout));
        assert_eq!(t.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_chunks_yields_empty_string() {
        let t = Recording::new(None);
        assert_eq!(translate_chunks(&t, &[], "en").await.unwrap(), "");
    }

    #[tokio::test]
    async fn dictionary_chunks_join_with_danda() {
        let t = DictionaryTranslator::new();
        let chunks = vec!["good morning".to_string(), "thank you".to_string()];
        let out = translate_chunks(&t, &chunks, "en").await.unwrap();
        assert_eq!(out, "நல்ல காலை। நன்றி நீங்கள்");
    }

    #[tokio::test]
    async fn fallback_chunks_join_with_the_dictionary_separator() {
        let t = FallbackTranslator::new(
            Arc::new(Recording::new(Some(0))),
            Arc::new(DictionaryTranslator::new()),
        );
        let chunks = vec!["good morning".to_string(), "thank you".to_string()];
        let out = translate_chunks(&t, &chunks, "en").await.unwrap();
        assert_eq!(out, "நல்ல காலை। நன்றி நீங்கள்");
    }

    #[tokio::test]
    async fn paragraphs_join_with_blank_line() {
        let t = Recording::new(None);
        let paragraphs = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        let out = translate_paragraphs(&t, &paragraphs, "en").await.unwrap();
        assert_eq!(out, "<a> <b>\n\n<c>");
    }

    #[test]
    fn factory_builds_every_backend() {
        for backend in TranslatorBackend::ALL {
            let mut cfg = TranslatorConfig::default();
            cfg.backend = backend;
            let t = create_translator(&cfg);
            assert!(!t.name().is_empty());
        }
    }

    #[test]
    fn factory_wraps_network_backend_when_fallback_enabled() {
        let mut cfg = TranslatorConfig::default();
        cfg.backend = TranslatorBackend::HttpApi;
        cfg.fallback_to_dictionary = true;
        let t = create_translator(&cfg);
        assert_eq!(t.name(), "translation-api (fallback: dictionary)");
    }

    #[test]
    fn error_messages_are_readable() {
        let e = TranslateError::Status {
            status: 429,
            body: "slow down".into(),
        };
        assert_eq!(
            e.to_string(),
            "translation service returned HTTP 429: slow down"
        );
    }
}
