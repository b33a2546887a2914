//! Configuration module for the Tamil translator.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each pipeline
//! stage, `AppPaths` for cross-platform directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, ChunkConfig, HttpApiConfig, LlmConfig, PdfConfig, PolishConfig, Seq2SeqConfig,
    SpeechConfig, TranslatorBackend, TranslatorConfig, UiConfig,
};
