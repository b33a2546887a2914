//! Tamil-script checks on translated output.
//!
//! A backend that silently returns its input (an unreachable API behind a
//! fallback, or the dictionary leaving unknown words untouched) produces
//! text with little or no Tamil in it.  The pipeline surfaces that as a
//! warning instead of presenting it as a translation.

/// First codepoint of the Tamil Unicode block.
const TAMIL_START: char = '\u{0B80}';

/// Last codepoint of the Tamil Unicode block.
const TAMIL_END: char = '\u{0BFF}';

/// Outcome of [`validate_tamil_output`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TamilCheck {
    /// Every letter in the text is Tamil.
    Complete,
    /// Some letters are Tamil; `ratio` is the Tamil share of letters.
    Partial { ratio: f32 },
    /// No Tamil letters at all.
    Missing,
}

/// Returns `true` if `c` is in the Tamil block (U+0B80–U+0BFF).
#[inline]
pub fn is_tamil(c: char) -> bool {
    (TAMIL_START..=TAMIL_END).contains(&c)
}

/// Share of Tamil characters among the alphabetic / Tamil characters of
/// `text`.  Digits, punctuation and whitespace are ignored.  Returns `0.0`
/// for text without letters.
pub fn tamil_ratio(text: &str) -> f32 {
    let mut letters = 0usize;
    let mut tamil = 0usize;
    for c in text.chars() {
        if is_tamil(c) {
            tamil += 1;
            letters += 1;
        } else if c.is_alphabetic() {
            letters += 1;
        }
    }
    if letters == 0 {
        0.0
    } else {
        tamil as f32 / letters as f32
    }
}

/// Classify how much of `text` is actually Tamil.
///
/// ```
/// use tamil_translator::text::{validate_tamil_output, TamilCheck};
///
/// assert_eq!(validate_tamil_output("வணக்கம்"), TamilCheck::Complete);
/// assert_eq!(validate_tamil_output("hello"), TamilCheck::Missing);
/// ```
pub fn validate_tamil_output(text: &str) -> TamilCheck {
    let ratio = tamil_ratio(text);
    if ratio <= 0.0 {
        TamilCheck::Missing
    } else if ratio >= 1.0 {
        TamilCheck::Complete
    } else {
        TamilCheck::Partial { ratio }
    }
}
