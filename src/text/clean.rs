//! Sentence normalisation for word-table lookup.

use unicode_normalization::char::is_combining_mark;

/// Lower-case `text` and drop every character that is not a word character,
/// whitespace, or `.`.
///
/// Word characters are alphanumerics (any script), combining marks, and
/// `_`.  Marks matter for Indic scripts: vowel signs and the virama / pulli
/// are part of the word.
///
/// ```
/// use tamil_translator::text::clean_text;
///
/// assert_eq!(clean_text("Hello, World!"), "hello world");
/// assert_eq!(clean_text("It's 5 p.m."), "its 5 p.m.");
/// ```
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| {
            c.is_alphanumeric()
                || is_combining_mark(c)
                || c == '_'
                || c.is_whitespace()
                || c == '.'
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(clean_text("GOOD Morning"), "good morning");
    }

    #[test]
    fn strips_punctuation_but_keeps_dots() {
        assert_eq!(clean_text("what?! is; this."), "what is this.");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(clean_text("snake_case 42"), "snake_case 42");
    }

    #[test]
    fn keeps_non_latin_letters() {
        assert_eq!(clean_text("Привет, мир"), "привет мир");
    }

    #[test]
    fn keeps_indic_combining_marks() {
        assert_eq!(clean_text("வணக்கம், नमस्ते!"), "வணக்கம் नमस्ते");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_text(""), "");
    }
}
