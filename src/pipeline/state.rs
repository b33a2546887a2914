//! Pipeline state machine and shared application state.
//!
//! [`PipelineState`] drives the orchestrator's state machine.  The UI reads
//! it via [`SharedState`] to decide what to render.
//!
//! [`AppState`] is the single source of truth for everything the UI needs:
//! current pipeline phase, the last finished translation, warnings from
//! optional steps, config snapshot, and any error message.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::pipeline::TranslationOutcome;

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the translation pipeline.
///
/// ```text
/// Idle ──submit──▶ Detecting ──▶ Translating ──▶ [Polishing]
///                                   ──▶ [Synthesizing] ──▶ [Rendering] ──▶ Result
/// any state ──fatal error──▶ Error
/// Error / Result ──next submit──▶ Detecting
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PipelineState {
    /// Waiting for the user to submit text.
    #[default]
    Idle,

    /// Identifying the source language.
    Detecting,

    /// Chunks are being sent to the translation backend.
    Translating,

    /// Applying substitution rules to the Tamil output.
    Polishing,

    /// Speech audio is being generated chunk by chunk.
    Synthesizing,

    /// The PDF is being laid out and written.
    Rendering,

    /// The translation is ready (possibly with warnings).
    Result,

    /// The request failed.  The next submit starts over.
    Error,
}

impl PipelineState {
    /// Returns `true` while a request is in flight.
    ///
    /// The UI uses this to disable the Translate button.
    ///
    /// ```
    /// use tamil_translator::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Translating.is_busy());
    /// assert!(!PipelineState::Result.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Detecting
                | PipelineState::Translating
                | PipelineState::Polishing
                | PipelineState::Synthesizing
                | PipelineState::Rendering
        )
    }

    /// A short human-readable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Ready",
            PipelineState::Detecting => "Detecting language",
            PipelineState::Translating => "Translating",
            PipelineState::Polishing => "Polishing",
            PipelineState::Synthesizing => "Generating speech",
            PipelineState::Rendering => "Writing PDF",
            PipelineState::Result => "Done",
            PipelineState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state.
///
/// Held behind [`SharedState`].  The orchestrator mutates it; the egui
/// update loop reads it each frame.
pub struct AppState {
    /// Current phase of the pipeline.
    pub pipeline: PipelineState,

    /// The most recent successful translation.
    ///
    /// Kept across a later failure so the user does not lose the output.
    pub last_outcome: Option<TranslationOutcome>,

    /// Non-fatal problems from the last request (speech, PDF, output check).
    pub warnings: Vec<String>,

    /// Current application configuration.
    pub config: AppConfig,

    /// Error message to display when `pipeline == PipelineState::Error`.
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            pipeline: PipelineState::Idle,
            last_outcome: None,
            warnings: Vec::new(),
            config,
            error_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].
///
/// Lock for a short critical section; do **not** hold the lock across
/// `.await` points.
pub type SharedState = Arc<Mutex<AppState>>;

pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_result_and_error_are_not_busy() {
        assert!(!PipelineState::Idle.is_busy());
        assert!(!PipelineState::Result.is_busy());
        assert!(!PipelineState::Error.is_busy());
    }

    #[test]
    fn working_states_are_busy() {
        for state in [
            PipelineState::Detecting,
            PipelineState::Translating,
            PipelineState::Polishing,
            PipelineState::Synthesizing,
            PipelineState::Rendering,
        ] {
            assert!(state.is_busy(), "{state:?} should be busy");
        }
    }

    #[test]
    fn labels() {
        assert_eq!(PipelineState::Idle.label(), "Ready");
        assert_eq!(PipelineState::Translating.label(), "Translating");
        assert_eq!(PipelineState::Synthesizing.label(), "Generating speech");
        assert_eq!(PipelineState::Result.label(), "Done");
        assert_eq!(PipelineState::Error.label(), "Error");
    }

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    #[test]
    fn app_state_starts_empty() {
        let state = AppState::default();
        assert_eq!(state.pipeline, PipelineState::Idle);
        assert!(state.last_outcome.is_none());
        assert!(state.warnings.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        state.lock().unwrap().pipeline = PipelineState::Rendering;
        assert_eq!(state2.lock().unwrap().pipeline, PipelineState::Rendering);
    }
}
