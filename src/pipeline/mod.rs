//! Pipeline orchestrator module.
//!
//! This module wires detect → segment → chunk → translate → polish →
//! speech → PDF and exposes the shared state that the UI reads every frame.
//!
//! # Architecture
//!
//! ```text
//! TranslatorApp (egui) ── TranslationRequest (mpsc) ──▶ PipelineOrchestrator::run()
//!                                                          │  async tokio task
//!                                                          ├─ detect_language     → Detecting
//!                                                          ├─ translate_paragraphs → Translating
//!                                                          ├─ PolishRules::apply  → Polishing
//!                                                          ├─ synthesize_chunks   → Synthesizing
//!                                                          └─ spawn_blocking(pdf) → Rendering
//!
//! SharedState (Arc<Mutex<AppState>>) ←─── read by egui update() each frame
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use tamil_translator::config::AppConfig;
//! use tamil_translator::pdf::PdfWriter;
//! use tamil_translator::pipeline::{new_shared_state, PipelineOrchestrator, TranslationRequest};
//! use tamil_translator::polish::PolishRules;
//! use tamil_translator::speech::ApiSynthesizer;
//! use tamil_translator::translate::create_translator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let shared_state = new_shared_state(config.clone());
//!
//!     let (request_tx, request_rx) = mpsc::channel(16);
//!     let orchestrator = PipelineOrchestrator::new(
//!         shared_state.clone(),
//!         create_translator(&config.translator),
//!         Arc::new(ApiSynthesizer::from_config(&config.speech)),
//!         PolishRules::load_or_default(),
//!         PdfWriter::from_config(&config.pdf, config.resolved_pdf_font()),
//!     );
//!
//!     tokio::spawn(async move { orchestrator.run(request_rx).await });
//!     request_tx.send(TranslationRequest::new("Good morning")).await.unwrap();
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineError, PipelineOrchestrator, TranslationOutcome, TranslationRequest};
pub use state::{new_shared_state, AppState, PipelineState, SharedState};
