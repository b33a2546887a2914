//! Offline word-table translator.
//!
//! Each sentence is cleaned, split into words, and every word looked up in
//! a small English → Tamil table; unknown words pass through unchanged.
//! Tamil is verb-final, so for sentences of more than two words the first
//! word is moved to the end as a crude SOV reordering.  Sentences are joined
//! with a danda (`।`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::text::clean_text;
use crate::translate::{TranslateError, Translator};

/// Built-in word table.  An empty target drops the word (English copulas
/// have no Tamil counterpart).
pub const BASIC_WORDS: &[(&str, &str)] = &[
    ("hello", "வணக்கம்"),
    ("hi", "வணக்கம்"),
    ("how", "எப்படி"),
    ("are", ""),
    ("you", "நீங்கள்"),
    ("i", "நான்"),
    ("am", "இருக்கிறேன்"),
    ("fine", "நன்றாக"),
    ("what", "என்ன"),
    ("is", ""),
    ("your", "உங்கள்"),
    ("name", "பெயர்"),
    ("thank", "நன்றி"),
    ("thanks", "நன்றி"),
    ("good", "நல்ல"),
    ("morning", "காலை"),
    ("evening", "மாலை"),
    ("night", "இரவு"),
];

/// Separator between translated sentences.
const SENTENCE_JOIN: &str = "। ";

/// Word-by-word dictionary translator.
pub struct DictionaryTranslator {
    words: HashMap<String, String>,
}

impl DictionaryTranslator {
    /// Translator backed by [`BASIC_WORDS`].
    pub fn new() -> Self {
        let words = BASIC_WORDS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { words }
    }

    /// Translate a single sentence (no terminators).
    pub fn translate_sentence(&self, sentence: &str) -> String {
        let mut tamil_words: Vec<&str> = sentence
            .split_whitespace()
            .map(|w| self.words.get(w).map(String::as_str).unwrap_or(w))
            .collect();

        if tamil_words.len() > 2 {
            tamil_words.rotate_left(1);
        }

        tamil_words
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split `text` on `.`, `!` and `?`, translate every non-empty sentence,
    /// and join the results with a danda.
    pub fn translate_paragraph(&self, text: &str) -> String {
        text.split(['.', '!', '?'])
            .map(|s| clean_text(s.trim()))
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.translate_sentence(&s))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(SENTENCE_JOIN)
    }
}

impl Default for DictionaryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        if source_lang != "en" && source_lang != "und" {
            log::debug!(
                "dictionary: source language {source_lang} is not English; unknown words pass through"
            );
        }
        Ok(self.translate_paragraph(text))
    }

    fn name(&self) -> &str {
        "dictionary"
    }

    fn chunk_separator(&self) -> &str {
        SENTENCE_JOIN
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
