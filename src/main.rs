//! Application entry point: Tamil Translator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the translator, speech synthesizer, polish rules and PDF writer
//!    from config.
//! 5. Create the request channel and spawn the pipeline orchestrator.
//! 6. Run [`eframe::run_native`]; blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;

use tamil_translator::{
    app::{install_tamil_font, TranslatorApp},
    config::AppConfig,
    pdf::PdfWriter,
    pipeline::{new_shared_state, PipelineOrchestrator, TranslationRequest},
    polish::PolishRules,
    speech::{ApiSynthesizer, SpeechSynthesizer},
    translate::create_translator,
};

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("Tamil Translator")
        .with_inner_size([width, height])
        .with_min_inner_size([420.0, 360.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tamil Translator starting up");

    // 2. Configuration
    if AppConfig::is_first_run() {
        log::info!("No settings file found; writing defaults");
        if let Err(e) = AppConfig::default().save() {
            log::warn!("Failed to write default config: {e}");
        }
    }
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // 4. Backends
    let translator = create_translator(&config.translator);
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(ApiSynthesizer::from_config(&config.speech));

    let polish = if config.polish.use_builtin_rules {
        PolishRules::load_or_default()
    } else {
        PolishRules::load_from(
            tamil_translator::config::AppPaths::new().polish_rules_file,
            false,
        )
    };
    log::info!("{} polish rule(s) loaded", polish.len());

    let pdf = PdfWriter::from_config(&config.pdf, config.resolved_pdf_font());

    // 5. Channel + orchestrator
    let shared_state = new_shared_state(config.clone());
    let (request_tx, request_rx) = mpsc::channel::<TranslationRequest>(16);

    let orchestrator = PipelineOrchestrator::new(
        Arc::clone(&shared_state),
        translator,
        synthesizer,
        polish,
        pdf,
    );
    rt.spawn(orchestrator.run(request_rx));

    // 6. Build the egui app and run it (blocks until the window is closed)
    let app = TranslatorApp::new(shared_state, request_tx, config.clone());
    let options = native_options(&config);
    let tamil_font = config.ui.tamil_font.clone();

    eframe::run_native(
        "Tamil Translator",
        options,
        Box::new(move |cc| {
            match &tamil_font {
                Some(path) => {
                    if let Err(e) = install_tamil_font(&cc.egui_ctx, path) {
                        log::warn!("Could not load Tamil font {}: {e}", path.display());
                    }
                }
                None => log::warn!(
                    "No Tamil font configured (ui.tamil_font); output may render as boxes"
                ),
            }
            Ok(Box::new(app))
        }),
    )
}
