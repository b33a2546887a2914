//! Sentence and paragraph segmentation.
//!
//! Sentence boundaries follow Unicode UAX #29 (via `unicode-segmentation`),
//! which already treats `.`, `!`, `?` and the Devanagari danda `।` / `॥`
//! as terminators.  Terminators stay attached to their sentence so
//! network backends see normal punctuation.
//!
//! UAX #29 breaks after every line feed, so single line breaks inside a
//! paragraph are folded into spaces first; blank lines always end a
//! sentence.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into trimmed, non-empty sentences.
///
/// ```
/// use tamil_translator::text::segment_sentences;
///
/// let s = segment_sentences("Hello there. How are you? Fine!");
/// assert_eq!(s, vec!["Hello there.", "How are you?", "Fine!"]);
/// ```
pub fn segment_sentences(text: &str) -> Vec<String> {
    segment_paragraphs(text)
        .iter()
        .flat_map(|para| {
            let flat = para.replace('\n', " ");
            flat.split_sentence_bounds()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Split `text` into paragraphs separated by one or more blank lines.
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}
