//! Pipeline orchestrator: detect → segment → chunk → translate → polish →
//! speech → PDF.
//!
//! [`PipelineOrchestrator`] owns the [`SharedState`] and processes
//! [`TranslationRequest`]s received over a `tokio::sync::mpsc` channel, one
//! at a time and in order.
//!
//! # Pipeline flow
//!
//! ```text
//! TranslationRequest
//!   └─▶ empty input?                 → Error ("Please enter some text.")
//!   └─▶ detect_language              [Detecting]
//!   └─▶ chunk_paragraphs             (paragraph breaks survive)
//!   └─▶ translate_paragraphs (async) [Translating]
//!         ├─ Err → Error
//!         └─ Ok  → polish            [Polishing]     (optional)
//!                 → synthesize       [Synthesizing]  (optional, warning on failure)
//!                 → spawn_blocking(PdfWriter::write) [Rendering] (optional, warning on failure)
//!                 → Result
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::pdf::PdfWriter;
use crate::polish::PolishRules;
use crate::speech::{synthesize_chunks, write_audio, SpeechSynthesizer};
use crate::text::{
    chunk_paragraphs, chunk_sentences, detect_language, segment_sentences, validate_tamil_output,
    ChunkLimits, DetectedLanguage, TamilCheck,
};
use crate::translate::{translate_paragraphs, Translator};

use super::state::{AppState, PipelineState, SharedState};

/// Title embedded in generated PDFs.
const PDF_TITLE: &str = "Tamil translation";

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// One submission from the form.
#[derive(Debug, Clone, Default)]
pub struct TranslationRequest {
    pub text: String,
    /// Apply the polish rules to the translated text.
    pub polish: bool,
    /// Generate a speech audio file.
    pub speech: bool,
    /// Generate a PDF.
    pub pdf: bool,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Everything the UI shows after a successful request.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// The trimmed input text.
    pub source_text: String,
    pub detected: DetectedLanguage,
    /// Backend output before polishing.
    pub translated: String,
    /// Final text shown to the user (polished when requested).
    pub output: String,
    /// Name of the backend that served the request.
    pub backend: String,
    /// Number of chunks sent to the backend.
    pub chunks: usize,
    pub audio_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors that can surface inside the pipeline.
///
/// Every variant renders as a message fit for the UI.  `Speech` and `Pdf`
/// only ever end up in the warning list.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input was empty or whitespace only.
    #[error("Please enter some text.")]
    EmptyInput,
    /// The translation backend failed.
    #[error("Translation failed: {0}")]
    Translate(String),
    /// Speech synthesis or writing the audio file failed.
    #[error("Speech generation failed: {0}")]
    Speech(String),
    /// Writing the PDF failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    /// Internal / unexpected error (e.g. tokio join failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete translation pipeline.
///
/// Create with [`PipelineOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.  Chunking limits, the target language and the
/// output directory are read from the config held in [`SharedState`] at the
/// start of each request.
pub struct PipelineOrchestrator {
    state: SharedState,
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    polish: PolishRules,
    pdf: PdfWriter,
}

/// Per-request settings copied out of the shared config.
struct RequestSettings {
    chunk_limits: ChunkLimits,
    speech_max_chars: usize,
    target_language: String,
    output_dir: PathBuf,
}

impl PipelineOrchestrator {
    pub fn new(
        state: SharedState,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        polish: PolishRules,
        pdf: PdfWriter,
    ) -> Self {
        Self {
            state,
            translator,
            synthesizer,
            polish,
            pdf,
        }
    }

    /// Run the orchestrator until `request_rx` is closed.
    pub async fn run(mut self, mut request_rx: mpsc::Receiver<TranslationRequest>) {
        while let Some(request) = request_rx.recv().await {
            self.handle_request(request).await;
        }

        log::info!("pipeline: request channel closed, orchestrator shutting down");
    }

    async fn handle_request(&mut self, request: TranslationRequest) {
        {
            let mut st = self.lock_state();
            st.warnings.clear();
            st.error_message = None;
        }

        match self.process(request).await {
            Ok(outcome) => {
                log::info!(
                    "pipeline: done ({} chunk(s) via {})",
                    outcome.chunks,
                    outcome.backend
                );
                let mut st = self.lock_state();
                st.pipeline = PipelineState::Result;
                st.last_outcome = Some(outcome);
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    async fn process(
        &mut self,
        request: TranslationRequest,
    ) -> Result<TranslationOutcome, PipelineError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let settings = self.settings();

        // ── 1. Detect ────────────────────────────────────────────────────
        self.set_pipeline(PipelineState::Detecting);
        let detected = detect_language(text);
        log::info!(
            "pipeline: detected {} ({}, confidence {:.2})",
            detected.name,
            detected.code,
            detected.confidence
        );

        // ── 2. Segment + chunk ───────────────────────────────────────────
        let paragraphs = chunk_paragraphs(text, settings.chunk_limits);
        let chunk_count: usize = paragraphs.iter().map(Vec::len).sum();
        if chunk_count == 0 {
            return Err(PipelineError::EmptyInput);
        }
        log::debug!(
            "pipeline: {} paragraph(s) in {} chunk(s)",
            paragraphs.len(),
            chunk_count
        );

        // ── 3. Translate ─────────────────────────────────────────────────
        self.set_pipeline(PipelineState::Translating);
        let translated =
            translate_paragraphs(self.translator.as_ref(), &paragraphs, &detected.code)
                .await
                .map_err(|e| PipelineError::Translate(e.to_string()))?;

        // ── 4. Polish ────────────────────────────────────────────────────
        let output = if request.polish {
            self.set_pipeline(PipelineState::Polishing);
            self.polish.apply(&translated)
        } else {
            translated.clone()
        };

        match validate_tamil_output(&output) {
            TamilCheck::Missing => {
                self.warn("The translation contains no Tamil text.".to_string());
            }
            TamilCheck::Partial { ratio } => {
                log::debug!("pipeline: output is {:.0}% Tamil", ratio * 100.0);
            }
            TamilCheck::Complete => {}
        }

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S-%3f").to_string();

        // ── 5. Speech ────────────────────────────────────────────────────
        let audio_path = if request.speech {
            self.set_pipeline(PipelineState::Synthesizing);
            let path = settings.output_dir.join(format!(
                "translation-{stamp}.{}",
                self.synthesizer.file_extension()
            ));
            match self.synthesize(&output, &settings, &path).await {
                Ok(()) => Some(path),
                Err(e) => {
                    self.warn(e.to_string());
                    None
                }
            }
        } else {
            None
        };

        // ── 6. PDF (blocking → thread pool) ──────────────────────────────
        let pdf_path = if request.pdf {
            self.set_pipeline(PipelineState::Rendering);
            let path = settings.output_dir.join(format!("translation-{stamp}.pdf"));
            match self.render_pdf(&output, &path).await {
                Ok(()) => Some(path),
                Err(e) => {
                    self.warn(e.to_string());
                    None
                }
            }
        } else {
            None
        };

        Ok(TranslationOutcome {
            source_text: text.to_string(),
            detected,
            translated,
            output,
            backend: self.translator.name().to_string(),
            chunks: chunk_count,
            audio_path,
            pdf_path,
        })
    }

    /// Chunk the Tamil text for the speech endpoint, synthesize, and write
    /// the concatenated audio to `path`.
    async fn synthesize(
        &self,
        text: &str,
        settings: &RequestSettings,
        path: &Path,
    ) -> Result<(), PipelineError> {
        let sentences = segment_sentences(text);
        let chunks = chunk_sentences(&sentences, ChunkLimits::chars(settings.speech_max_chars));

        let speech = synthesize_chunks(
            self.synthesizer.as_ref(),
            &chunks,
            &settings.target_language,
        )
        .await
        .map_err(|e| PipelineError::Speech(e.to_string()))?;

        if speech.is_partial() {
            self.warn(format!(
                "Speech: {} of {} chunk(s) failed and were skipped.",
                speech.chunks_failed,
                speech.chunks_ok + speech.chunks_failed
            ));
        }

        write_audio(path, &speech.audio).map_err(|e| PipelineError::Speech(e.to_string()))?;
        log::info!("pipeline: audio written to {}", path.display());
        Ok(())
    }

    async fn render_pdf(&self, text: &str, path: &Path) -> Result<(), PipelineError> {
        let writer = self.pdf.clone();
        let text = text.to_string();
        let target = path.to_path_buf();

        let result =
            tokio::task::spawn_blocking(move || writer.write(&target, PDF_TITLE, &text)).await;

        match result {
            Ok(Ok(pages)) => {
                log::debug!("pipeline: pdf has {pages} page(s)");
                Ok(())
            }
            Ok(Err(e)) => Err(PipelineError::Pdf(e.to_string())),
            Err(e) => Err(PipelineError::Internal(e.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn settings(&self) -> RequestSettings {
        let st = self.lock_state();
        RequestSettings {
            chunk_limits: ChunkLimits::from(&st.config.chunking),
            speech_max_chars: st.config.speech.max_chars.max(1),
            target_language: st.config.translator.target_language.clone(),
            output_dir: st.config.resolved_output_dir(),
        }
    }

    /// Lock the shared state, recovering the guard if a UI panic poisoned it.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_pipeline(&self, state: PipelineState) {
        self.lock_state().pipeline = state;
    }

    fn warn(&self, message: String) {
        log::warn!("pipeline warning: {message}");
        self.lock_state().warnings.push(message);
    }

    fn set_error(&self, message: String) {
        log::error!("pipeline error: {message}");
        let mut st = self.lock_state();
        st.pipeline = PipelineState::Error;
        st.error_message = Some(message);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
