//! PDF export of the translated text.
//!
//! Text is wrapped to a fixed number of characters per line
//! ([`wrap_lines`]), split into fixed-size pages ([`paginate`]) and laid
//! out top-to-bottom on A4 pages by [`PdfWriter`].

pub mod layout;
pub mod writer;

use thiserror::Error;

pub use layout::{paginate, wrap_lines};
pub use writer::PdfWriter;

/// Errors raised while writing a PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    /// No font configured.  The built-in PDF fonts have no Tamil glyphs.
    #[error("no Tamil font configured (set pdf.font_path or ui.tamil_font)")]
    FontMissing,

    /// The configured font could not be read or embedded.
    #[error("cannot load font: {0}")]
    Font(String),

    /// Creating or writing the output file failed.
    #[error("cannot write PDF: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF library failed to serialise the document.
    #[error("PDF rendering failed: {0}")]
    Render(String),
}
