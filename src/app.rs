//! Translation form: egui/eframe application.
//!
//! # Architecture
//!
//! [`TranslatorApp`] is the top-level [`eframe::App`].  It owns the form
//! inputs and the sending end of the request channel; everything produced
//! by the pipeline is read back from [`SharedState`] each frame.
//!
//! ```text
//! Translate button ── TranslationRequest ──▶ PipelineOrchestrator
//!        ▲                                          │
//!        └──────── SharedState (read per frame) ◀───┘
//! ```
//!
//! | State | Visual |
//! |-------|--------|
//! | `Idle` | Form only |
//! | busy states | Spinner + step label, Translate disabled |
//! | `Result` | Tamil output, copy button, file paths, warnings |
//! | `Error` | Error message in orange (previous output kept) |

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{AppConfig, AppPaths, TranslatorBackend};
use crate::pipeline::{PipelineState, SharedState, TranslationOutcome, TranslationRequest};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(68, 136, 255);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const WARN_YELLOW: egui::Color32 = egui::Color32::from_rgb(230, 190, 80);
const ERROR_ORANGE: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);
const DIM: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);

/// Register the font at `path` as a fallback for both egui families so
/// Tamil glyphs render.
pub fn install_tamil_font(ctx: &egui::Context, path: &Path) -> std::io::Result<()> {
    let bytes = std::fs::read(path)?;

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "tamil".to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("tamil".to_owned());
    }
    ctx.set_fonts(fonts);

    log::info!("ui: Tamil font loaded from {}", path.display());
    Ok(())
}

/// Copy of the shared state taken once per frame so the lock is not held
/// while drawing.
struct Snapshot {
    pipeline: PipelineState,
    outcome: Option<TranslationOutcome>,
    warnings: Vec<String>,
    error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// TranslatorApp
// ---------------------------------------------------------------------------

/// eframe application: the translation form.
pub struct TranslatorApp {
    state: SharedState,
    request_tx: mpsc::Sender<TranslationRequest>,

    // ── Form ─────────────────────────────────────────────────────────────
    input: String,
    polish: bool,
    speech: bool,
    pdf: bool,

    // ── UI state ─────────────────────────────────────────────────────────
    show_settings: bool,

    /// Application configuration (read-only after startup).
    config: AppConfig,
}

impl TranslatorApp {
    /// Create the app; checkbox defaults come from `config`.
    pub fn new(
        state: SharedState,
        request_tx: mpsc::Sender<TranslationRequest>,
        config: AppConfig,
    ) -> Self {
        Self {
            state,
            request_tx,
            input: String::new(),
            polish: config.polish.enabled,
            speech: config.speech.enabled,
            pdf: config.pdf.enabled,
            show_settings: false,
            config,
        }
    }

    /// The request the form currently describes.
    fn request(&self) -> TranslationRequest {
        TranslationRequest {
            text: self.input.clone(),
            polish: self.polish,
            speech: self.speech,
            pdf: self.pdf,
        }
    }

    /// Send the form to the pipeline unless a request is already running.
    ///
    /// A queued request marks the state `Detecting` straight away, so the
    /// button is disabled before the orchestrator picks the request up.
    /// Returns `true` when the request was queued.
    fn submit(&self) -> bool {
        let mut st = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if st.pipeline.is_busy() {
            return false;
        }
        match self.request_tx.try_send(self.request()) {
            Ok(()) => {
                st.pipeline = PipelineState::Detecting;
                st.error_message = None;
                true
            }
            Err(e) => {
                log::warn!("ui: could not queue request: {e}");
                false
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        let st = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Snapshot {
            pipeline: st.pipeline.clone(),
            outcome: st.last_outcome.clone(),
            warnings: st.warnings.clone(),
            error_message: st.error_message.clone(),
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_title_bar(&mut self, ui: &mut egui::Ui, snap: &Snapshot) {
        ui.horizontal(|ui| {
            ui.heading("Tamil Translator");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.show_settings { "Back" } else { "Settings" };
                if ui.button(label).clicked() {
                    self.show_settings = !self.show_settings;
                }
                ui.label(
                    egui::RichText::new(snap.pipeline.label())
                        .color(state_color(&snap.pipeline)),
                );
                if snap.pipeline.is_busy() {
                    ui.spinner();
                }
            });
        });
    }

    fn draw_form(&mut self, ui: &mut egui::Ui, busy: bool) {
        ui.label("Text to translate:");
        ui.add(
            egui::TextEdit::multiline(&mut self.input)
                .hint_text("Type or paste text in any language")
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.polish, "Polish output");
            ui.checkbox(&mut self.speech, "Generate speech");
            ui.checkbox(&mut self.pdf, "Generate PDF");
        });

        ui.add_space(4.0);
        if ui
            .add_enabled(!busy, egui::Button::new("Translate"))
            .clicked()
        {
            self.submit();
        }
    }

    fn draw_output(&self, ui: &mut egui::Ui, ctx: &egui::Context, outcome: &TranslationOutcome) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Tamil:").color(OK_GREEN));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Copy").clicked() {
                    ctx.copy_text(outcome.output.clone());
                }
            });
        });

        egui::ScrollArea::vertical()
            .max_height(200.0)
            .show(ui, |ui| {
                // A `&str` buffer keeps the text selectable but read-only.
                let mut text = outcome.output.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .desired_width(f32::INFINITY)
                        .desired_rows(6),
                );
            });

        if self.config.ui.show_detected_language {
            let detected = &outcome.detected;
            let line = if detected.is_undetermined() {
                "Detected language: unknown".to_string()
            } else {
                format!(
                    "Detected language: {} ({}, {:.0}%)",
                    detected.name,
                    detected.code,
                    detected.confidence * 100.0
                )
            };
            ui.label(egui::RichText::new(line).color(DIM).size(11.0));
        }
        ui.label(
            egui::RichText::new(format!(
                "Backend: {} ({} chunk(s))",
                outcome.backend, outcome.chunks
            ))
            .color(DIM)
            .size(11.0),
        );

        if let Some(path) = &outcome.audio_path {
            ui.label(format!("Audio: {}", path.display()));
        }
        if let Some(path) = &outcome.pdf_path {
            ui.label(format!("PDF: {}", path.display()));
        }
    }

    fn draw_warnings(&self, ui: &mut egui::Ui, warnings: &[String]) {
        for warning in warnings {
            ui.label(egui::RichText::new(format!("⚠ {warning}")).color(WARN_YELLOW));
        }
    }

    fn draw_error(&self, ui: &mut egui::Ui, message: &str) {
        ui.label(
            egui::RichText::new(message)
                .color(ERROR_ORANGE)
                .strong(),
        );
    }

    /// Read-only view of the effective configuration.
    fn draw_settings(&self, ui: &mut egui::Ui) {
        let translator = &self.config.translator;

        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Backend:");
                ui.label(translator.backend.label());
                ui.end_row();

                let endpoint = match translator.backend {
                    TranslatorBackend::Dictionary => None,
                    TranslatorBackend::HttpApi => Some(translator.http.base_url.clone()),
                    TranslatorBackend::Llm => Some(format!(
                        "{} ({})",
                        translator.llm.base_url, translator.llm.model
                    )),
                    TranslatorBackend::Seq2Seq => Some(format!(
                        "{} ({})",
                        translator.seq2seq.base_url, translator.seq2seq.model
                    )),
                };
                if let Some(endpoint) = endpoint {
                    ui.label("Endpoint:");
                    ui.label(endpoint);
                    ui.end_row();
                }

                ui.label("Dictionary fallback:");
                ui.label(if translator.fallback_to_dictionary { "on" } else { "off" });
                ui.end_row();

                ui.label("Target language:");
                ui.label(translator.target_language.as_str());
                ui.end_row();

                ui.label("Chunk limits:");
                ui.label(format!(
                    "{} chars / {} sentences",
                    self.config.chunking.max_chars, self.config.chunking.max_sentences
                ));
                ui.end_row();

                ui.label("Speech:");
                ui.label(format!(
                    "{} ({}, {})",
                    self.config.speech.base_url, self.config.speech.model, self.config.speech.voice
                ));
                ui.end_row();

                ui.label("PDF font:");
                ui.label(
                    self.config
                        .resolved_pdf_font()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "not set".into()),
                );
                ui.end_row();

                ui.label("Output folder:");
                ui.label(self.config.resolved_output_dir().display().to_string());
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!(
                "Edit {} to change these settings.",
                AppPaths::new().settings_file.display()
            ))
            .color(DIM)
            .size(11.0),
        );
    }
}

/// Accent colour for the status label.
fn state_color(state: &PipelineState) -> egui::Color32 {
    match state {
        PipelineState::Idle => DIM,
        PipelineState::Result => OK_GREEN,
        PipelineState::Error => ERROR_ORANGE,
        _ => ACCENT,
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snap = self.snapshot();
        let busy = snap.pipeline.is_busy();

        // Results arrive through shared state, so keep polling while busy.
        if busy {
            ctx.request_repaint_after(Duration::from_millis(66));
        }

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            self.draw_title_bar(ui, &snap);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.show_settings {
                self.draw_settings(ui);
                return;
            }

            self.draw_form(ui, busy);
            ui.separator();

            if snap.pipeline == PipelineState::Error {
                if let Some(msg) = &snap.error_message {
                    self.draw_error(ui, msg);
                }
            }
            self.draw_warnings(ui, &snap.warnings);

            if let Some(outcome) = &snap.outcome {
                ui.add_space(4.0);
                self.draw_output(ui, ctx, outcome);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Tamil translator closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::new_shared_state;

    fn make_app(config: AppConfig) -> (TranslatorApp, mpsc::Receiver<TranslationRequest>) {
        let (tx, rx) = mpsc::channel(4);
        let app = TranslatorApp::new(new_shared_state(config.clone()), tx, config);
        (app, rx)
    }

    #[test]
    fn checkboxes_start_from_config() {
        let mut config = AppConfig::default();
        config.speech.enabled = true;
        let (app, _rx) = make_app(config);

        assert!(app.polish);
        assert!(app.speech);
        assert!(!app.pdf);
    }

    #[test]
    fn submit_sends_form_values() {
        let (mut app, mut rx) = make_app(AppConfig::default());
        app.input = "Good morning".into();
        app.pdf = true;

        assert!(app.submit());

        let request = rx.try_recv().unwrap();
        assert_eq!(request.text, "Good morning");
        assert!(request.polish);
        assert!(!request.speech);
        assert!(request.pdf);
    }

    #[test]
    fn submit_is_ignored_while_busy() {
        let (mut app, mut rx) = make_app(AppConfig::default());
        app.input = "Hello".into();
        app.state.lock().unwrap().pipeline = PipelineState::Translating;

        assert!(!app.submit());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn double_click_queues_one_request() {
        let (mut app, mut rx) = make_app(AppConfig::default());
        app.input = "Hello".into();
        app.state.lock().unwrap().error_message = Some("old".into());

        assert!(app.submit());
        assert!(!app.submit());

        {
            let st = app.state.lock().unwrap();
            assert_eq!(st.pipeline, PipelineState::Detecting);
            assert!(st.error_message.is_none());
        }
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let ctx = egui::Context::default();
        let dir = tempfile::tempdir().unwrap();
        assert!(install_tamil_font(&ctx, &dir.path().join("none.ttf")).is_err());
    }
}
