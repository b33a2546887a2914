//! Tamil translator: free-form text in, Tamil out, with optional polishing,
//! speech audio, and PDF output.

pub mod app;
pub mod config;
pub mod pdf;
pub mod pipeline;
pub mod polish;
pub mod speech;
pub mod text;
pub mod translate;
