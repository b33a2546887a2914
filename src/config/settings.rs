//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TranslatorBackend
// ---------------------------------------------------------------------------

/// Selects which translation backend turns source text into Tamil.
///
/// | Variant    | Backend                                      | Network |
/// |------------|----------------------------------------------|---------|
/// | Dictionary | Built-in word table, SOV word-order heuristic | No      |
/// | HttpApi    | Public translation endpoint (`client=gtx`)    | Yes     |
/// | Llm        | OpenAI-compatible chat completions           | Yes     |
/// | Seq2Seq    | Local NLLB / IndicTrans2 model server        | Local   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TranslatorBackend {
    #[default]
    Dictionary,
    HttpApi,
    Llm,
    Seq2Seq,
}

impl TranslatorBackend {
    /// Every backend, in the order the settings panel lists them.
    pub const ALL: [TranslatorBackend; 4] = [
        TranslatorBackend::Dictionary,
        TranslatorBackend::HttpApi,
        TranslatorBackend::Llm,
        TranslatorBackend::Seq2Seq,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TranslatorBackend::Dictionary => "Dictionary (offline)",
            TranslatorBackend::HttpApi => "Translation API",
            TranslatorBackend::Llm => "LLM rewrite",
            TranslatorBackend::Seq2Seq => "NLLB / IndicTrans2",
        }
    }
}

// ---------------------------------------------------------------------------
// Backend-specific configs
// ---------------------------------------------------------------------------

/// Public HTTP translation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpApiConfig {
    /// Base URL; `/translate_a/single` is appended.
    pub base_url: String,
    /// Maximum seconds to wait per request.
    pub timeout_secs: u64,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".into(),
            timeout_secs: 15,
        }
    }
}

/// Settings for the LLM rewrite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key; `None` for local providers.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"qwen2.5:7b"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Upper bound on generated tokens per chunk.
    pub max_tokens: u32,
    /// Maximum seconds to wait for an LLM response before timing out.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:7b".into(),
            temperature: 0.2,
            max_tokens: 2048,
            timeout_secs: 60,
        }
    }
}

/// Settings for a locally served sequence-to-sequence model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Seq2SeqConfig {
    /// Model server base URL; `/translate` is appended.
    pub base_url: String,
    /// Hub identifier of the model the server has loaded (informational,
    /// sent along with each request).
    pub model: String,
    /// Maximum generated length in tokens.
    pub max_length: u32,
    /// Beam width for generation.
    pub num_beams: u32,
    pub timeout_secs: u64,
}

impl Default for Seq2SeqConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            model: "facebook/nllb-200-distilled-600M".into(),
            max_length: 400,
            num_beams: 4,
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslatorConfig
// ---------------------------------------------------------------------------

/// Translation stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Which backend handles translation.
    pub backend: TranslatorBackend,
    /// Target language as an ISO-639-1 code.
    pub target_language: String,
    /// Retry a failed chunk with the offline dictionary instead of failing
    /// the whole request.
    pub fallback_to_dictionary: bool,
    pub http: HttpApiConfig,
    pub llm: LlmConfig,
    pub seq2seq: Seq2SeqConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            backend: TranslatorBackend::default(),
            target_language: "ta".into(),
            fallback_to_dictionary: false,
            http: HttpApiConfig::default(),
            llm: LlmConfig::default(),
            seq2seq: Seq2SeqConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChunkConfig
// ---------------------------------------------------------------------------

/// Bounds applied when grouping sentences into translation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (a longer single sentence still forms
    /// its own chunk).
    pub max_chars: usize,
    /// Maximum sentences per chunk.
    pub max_sentences: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 4500,
            max_sentences: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// PolishConfig
// ---------------------------------------------------------------------------

/// Rule-substitution ("polishing") settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolishConfig {
    /// Default state of the "polish" checkbox.
    pub enabled: bool,
    /// Apply the built-in formal → colloquial table before user rules.
    pub use_builtin_rules: bool,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_builtin_rules: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Default state of the "speech" checkbox.
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible `/v1/audio/speech` endpoint.
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub voice: String,
    /// Audio container requested from the API; also the file extension.
    pub format: String,
    /// Maximum characters sent per synthesis call.
    pub max_chars: usize,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "tts-1".into(),
            voice: "alloy".into(),
            format: "mp3".into(),
            max_chars: 500,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// PdfConfig
// ---------------------------------------------------------------------------

/// PDF export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Default state of the "PDF" checkbox.
    pub enabled: bool,
    /// TrueType font with Tamil glyphs (e.g. Noto Sans Tamil).  Falls back
    /// to `ui.tamil_font` when unset.
    pub font_path: Option<PathBuf>,
    /// Font size in points.
    pub font_size: f32,
    /// Fixed line width in characters.
    pub chars_per_line: usize,
    pub lines_per_page: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            font_path: None,
            font_size: 12.0,
            chars_per_line: 80,
            lines_per_page: 45,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// egui window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial window size `(width, height)` in points.
    pub window_size: (f32, f32),
    /// Font registered with egui so Tamil output renders.  egui's bundled
    /// fonts have no Tamil coverage.
    pub tamil_font: Option<PathBuf>,
    /// Show the detected source language under the output.
    pub show_detected_language: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (720.0, 640.0),
            tamil_font: None,
            show_detected_language: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// Missing sections fall back to their defaults, so a hand-written file only
/// needs the keys it changes.
///
/// ```rust,no_run
/// use tamil_translator::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides [`AppPaths::output_dir`].
    pub output_dir: Option<PathBuf>,
    pub translator: TranslatorConfig,
    pub chunking: ChunkConfig,
    pub polish: PolishConfig,
    pub speech: SpeechConfig,
    pub pdf: PdfConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }

    /// Directory for generated audio and PDF files.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| AppPaths::new().output_dir)
    }

    /// Font used for PDF export: the PDF-specific font, else the UI font.
    pub fn resolved_pdf_font(&self) -> Option<PathBuf> {
        self.pdf.font_path.clone().or_else(|| self.ui.tamil_font.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
