//! Bounded sentence chunking.
//!
//! Translation and speech services cap request sizes, so sentences are
//! grouped into chunks before each call.  The accumulation is a single pass:
//! a chunk is flushed as soon as the next sentence would push it over
//! either limit.

use crate::config::ChunkConfig;
use crate::text::{segment_paragraphs, segment_sentences};

/// Upper bounds for a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// Maximum characters (Unicode scalar values), counting the single
    /// space inserted between sentences.
    pub max_chars: usize,
    /// Maximum sentences per chunk.
    pub max_sentences: usize,
}

impl ChunkLimits {
    /// Limits bounded by characters only.
    pub fn chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            max_sentences: usize::MAX,
        }
    }
}

impl From<&ChunkConfig> for ChunkLimits {
    fn from(cfg: &ChunkConfig) -> Self {
        Self {
            max_chars: cfg.max_chars.max(1),
            max_sentences: cfg.max_sentences.max(1),
        }
    }
}

/// Group `sentences` into chunks joined by single spaces.
///
/// Order is preserved and nothing is dropped: a sentence longer than
/// `max_chars` on its own becomes a chunk by itself.
///
/// ```
/// use tamil_translator::text::{chunk_sentences, ChunkLimits};
///
/// let sentences = vec!["a.".to_string(), "b.".to_string(), "c.".to_string()];
/// let limits = ChunkLimits { max_chars: 100, max_sentences: 2 };
/// assert_eq!(chunk_sentences(&sentences, limits), vec!["a. b.", "c."]);
/// ```
pub fn chunk_sentences(sentences: &[String], limits: ChunkLimits) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;
    let mut current_count = 0usize;

    for sentence in sentences {
        let len = sentence.chars().count();
        if len == 0 {
            continue;
        }

        let joined_len = if current_count == 0 {
            len
        } else {
            current_chars + 1 + len
        };

        if current_count > 0
            && (joined_len > limits.max_chars || current_count >= limits.max_sentences)
        {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
            current_count = 0;
        }

        if current_count > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(sentence);
        current_chars += len;
        current_count += 1;
    }

    if current_count > 0 {
        chunks.push(current);
    }

    chunks
}

/// Chunk every paragraph of `text` on its own.
///
/// No chunk crosses a blank-line paragraph break, so translated paragraphs
/// can be rejoined with the break intact.  Paragraphs without sentences are
/// left out.
///
/// ```
/// use tamil_translator::text::{chunk_paragraphs, ChunkLimits};
///
/// let paras = chunk_paragraphs("One. Two.\n\nThree.", ChunkLimits::chars(100));
/// assert_eq!(paras, vec![vec!["One. Two.".to_string()], vec!["Three.".to_string()]]);
/// ```
pub fn chunk_paragraphs(text: &str, limits: ChunkLimits) -> Vec<Vec<String>> {
    segment_paragraphs(text)
        .iter()
        .map(|para| chunk_sentences(&segment_sentences(para), limits))
        .filter(|chunks| !chunks.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(items: &[&str]) -> Vec<String> {
        items.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_sentences(&[], ChunkLimits::chars(10)).is_empty());
    }

    #[test]
    fn everything_fits_in_one_chunk() {
        let chunks = chunk_sentences(&s(&["One.", "Two."]), ChunkLimits::chars(100));
        assert_eq!(chunks, vec!["One. Two."]);
    }

    #[test]
    fn flushes_when_char_limit_would_be_exceeded() {
        // "aaaa bbbb" is 9 chars; limit 8 forces a split.
        let chunks = chunk_sentences(&s(&["aaaa", "bbbb", "cc"]), ChunkLimits::chars(8));
        assert_eq!(chunks, vec!["aaaa", "bbbb cc"]);
    }

    #[test]
    fn exact_fit_is_not_split() {
        let chunks = chunk_sentences(&s(&["aaa", "bbb"]), ChunkLimits::chars(7));
        assert_eq!(chunks, vec!["aaa bbb"]);
    }

    #[test]
    fn flushes_on_sentence_count() {
        let limits = ChunkLimits {
            max_chars: 1000,
            max_sentences: 2,
        };
        let chunks = chunk_sentences(&s(&["1.", "2.", "3.", "4.", "5."]), limits);
        assert_eq!(chunks, vec!["1. 2.", "3. 4.", "5."]);
    }

    #[test]
    fn oversized_sentence_is_its_own_chunk() {
        let chunks = chunk_sentences(&s(&["hi", "a very long sentence", "ok"]), ChunkLimits::chars(5));
        assert_eq!(chunks, vec!["hi", "a very long sentence", "ok"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 7 + 1 + 5 chars, but well over 13 bytes.
        let chunks = chunk_sentences(&s(&["வணக்கம்", "நன்றி"]), ChunkLimits::chars(13));
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn skips_empty_sentences() {
        let chunks = chunk_sentences(&s(&["", "a", ""]), ChunkLimits::chars(10));
        assert_eq!(chunks, vec!["a"]);
    }

    #[test]
    fn paragraphs_are_never_merged_into_one_chunk() {
        let text = "First line\nstill first.\n\n\nSecond.";
        let paras = chunk_paragraphs(text, ChunkLimits::chars(1000));
        assert_eq!(
            paras,
            vec![s(&["First line still first."]), s(&["Second."])]
        );
    }

    #[test]
    fn paragraph_chunking_still_applies_limits() {
        let limits = ChunkLimits {
            max_chars: 1000,
            max_sentences: 1,
        };
        let paras = chunk_paragraphs("A. B.\n\nC.", limits);
        assert_eq!(paras, vec![s(&["A.", "B."]), s(&["C."])]);
    }

    #[test]
    fn blank_text_has_no_paragraphs() {
        assert!(chunk_paragraphs(" \n\n ", ChunkLimits::chars(10)).is_empty());
    }

    #[test]
    fn limits_from_config_are_at_least_one() {
        let cfg = ChunkConfig {
            max_chars: 0,
            max_sentences: 0,
        };
        let limits = ChunkLimits::from(&cfg);
        assert_eq!(limits.max_chars, 1);
        assert_eq!(limits.max_sentences, 1);
    }
}
