//! Text utilities shared by every pipeline stage.
//!
//! * [`segment_sentences`] / [`segment_paragraphs`]: split input text.
//! * [`chunk_sentences`] / [`chunk_paragraphs`]: bounded linear accumulation
//!   of sentences, optionally per paragraph.
//! * [`clean_text`]: normalisation used by the dictionary backend.
//! * [`detect_language`]: source-language detection via `whatlang`.
//! * [`tamil_ratio`] / [`validate_tamil_output`]: Tamil script checks.

pub mod chunk;
pub mod clean;
pub mod detect;
pub mod segment;
pub mod tamil;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use chunk::{chunk_paragraphs, chunk_sentences, ChunkLimits};
pub use clean::clean_text;
pub use detect::{detect_language, DetectedLanguage};
pub use segment::{segment_paragraphs, segment_sentences};
pub use tamil::{is_tamil, tamil_ratio, validate_tamil_output, TamilCheck};
