//! A4 PDF writer backed by `printpdf`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{Mm, PdfDocument};

use crate::config::PdfConfig;
use crate::pdf::{paginate, wrap_lines, PdfError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
/// Points → millimetres.
const PT_TO_MM: f32 = 0.3528;
/// Line height as a multiple of the font size.
const LEADING: f32 = 1.2;

/// Lays out wrapped text on A4 pages with an embedded TrueType font.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    font_path: Option<PathBuf>,
    font_size: f32,
    chars_per_line: usize,
    lines_per_page: usize,
}

impl PdfWriter {
    /// Build a writer from config; `font_path` is the resolved Tamil font
    /// (see [`AppConfig::resolved_pdf_font`](crate::config::AppConfig::resolved_pdf_font)).
    pub fn from_config(config: &PdfConfig, font_path: Option<PathBuf>) -> Self {
        Self {
            font_path,
            font_size: config.font_size,
            chars_per_line: config.chars_per_line,
            lines_per_page: config.lines_per_page,
        }
    }

    /// Render `text` into a PDF at `path`; returns the number of pages.
    ///
    /// Empty text still produces a single blank page.
    pub fn write(&self, path: &Path, title: &str, text: &str) -> Result<usize, PdfError> {
        let font_path = self.font_path.as_ref().ok_or(PdfError::FontMissing)?;
        let font_file = File::open(font_path)
            .map_err(|e| PdfError::Font(format!("{}: {e}", font_path.display())))?;

        let lines = wrap_lines(text, self.chars_per_line);
        let mut pages = paginate(&lines, self.lines_per_page);
        if pages.is_empty() {
            pages.push(Vec::new());
        }

        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
        let font = doc
            .add_external_font(font_file)
            .map_err(|e| PdfError::Font(format!("{e:?}")))?;

        let line_height = self.font_size * PT_TO_MM * LEADING;

        for (idx, page_lines) in pages.iter().enumerate() {
            let (page, layer) = if idx == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text")
            };
            let layer = doc.get_page(page).get_layer(layer);

            let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
            for line in page_lines {
                y -= line_height;
                if !line.is_empty() {
                    layer.use_text(line.as_str(), self.font_size, Mm(MARGIN_MM), Mm(y), &font);
                }
            }
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        doc.save(&mut out)
            .map_err(|e| PdfError::Render(format!("{e:?}")))?;

        log::info!("pdf: wrote {} page(s) to {}", pages.len(), path.display());
        Ok(pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture_font() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/RobotoMedium.ttf")
    }

    #[test]
    fn missing_font_is_reported_before_writing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let writer = PdfWriter::from_config(&PdfConfig::default(), None);

        let err = writer.write(&out, "t", "வணக்கம்").unwrap_err();
        assert!(matches!(err, PdfError::FontMissing));
        assert!(!out.exists());
    }

    #[test]
    fn unreadable_font_is_font_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let writer = PdfWriter::from_config(
            &PdfConfig::default(),
            Some(dir.path().join("no-such-font.ttf")),
        );

        let err = writer.write(&out, "t", "வணக்கம்").unwrap_err();
        assert!(matches!(err, PdfError::Font(msg) if msg.contains("no-such-font.ttf")));
    }

    #[test]
    fn default_layout_fits_on_a4() {
        let cfg = PdfConfig::default();
        let used = cfg.lines_per_page as f32 * cfg.font_size * PT_TO_MM * LEADING;
        assert!(used <= PAGE_HEIGHT_MM - 2.0 * MARGIN_MM);
    }

    #[test]
    fn long_text_spans_several_pages() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("out.pdf");
        let cfg = PdfConfig {
            chars_per_line: 20,
            lines_per_page: 5,
            ..PdfConfig::default()
        };
        let writer = PdfWriter::from_config(&cfg, Some(fixture_font()));
        let text = (1..=12)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(writer.write(&out, "t", &text).unwrap(), 3);
        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_text_gives_one_page() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("empty.pdf");
        let writer = PdfWriter::from_config(&PdfConfig::default(), Some(fixture_font()));

        assert_eq!(writer.write(&out, "t", "").unwrap(), 1);
        assert!(out.exists());
    }
}
