//! Fixed-width line wrapping and pagination.

/// Wrap `text` to at most `width` characters per line.
///
/// Words are packed greedily; a word longer than `width` is split across
/// lines.  Line breaks in the input are kept, and blank input lines stay
/// blank so paragraphs remain visible.
///
/// ```
/// use tamil_translator::pdf::wrap_lines;
///
/// assert_eq!(wrap_lines("aa bb cc", 5), vec!["aa bb", "cc"]);
/// ```
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for input_line in text.lines() {
        if input_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;

        for word in input_line.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();

            if chars.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let mut pieces = chars.chunks(width).peekable();
                while let Some(piece) = pieces.next() {
                    if pieces.peek().is_some() {
                        lines.push(piece.iter().collect());
                    } else {
                        current = piece.iter().collect();
                        current_len = piece.len();
                    }
                }
                continue;
            }

            let needed = if current_len == 0 {
                chars.len()
            } else {
                current_len + 1 + chars.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += chars.len();
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    // Trailing blank lines add nothing to the page.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Split `lines` into pages of at most `lines_per_page` lines.
pub fn paginate(lines: &[String], lines_per_page: usize) -> Vec<Vec<String>> {
    lines
        .chunks(lines_per_page.max(1))
        .map(|page| page.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_lines("வணக்கம் நண்பரே", 80), vec!["வணக்கம் நண்பரே"]);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_lines("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn exact_width_fits() {
        assert_eq!(wrap_lines("abc def", 7), vec!["abc def"]);
    }

    #[test]
    fn long_word_is_hard_split() {
        assert_eq!(
            wrap_lines("x abcdefghij y", 4),
            vec!["x", "abcd", "efgh", "ij y"]
        );
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        // Five Tamil code points, 15 bytes.
        let word = "நன்றி";
        assert_eq!(wrap_lines(word, 5), vec![word]);
    }

    #[test]
    fn paragraph_breaks_are_kept() {
        assert_eq!(
            wrap_lines("first\n\nsecond\n\n", 20),
            vec!["first", "", "second"]
        );
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_lines("", 10).is_empty());
    }

    #[test]
    fn paginates_with_remainder() {
        let lines: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        let pages = paginate(&lines, 3);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2], vec!["6"]);
    }

    #[test]
    fn zero_lines_per_page_is_treated_as_one() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(paginate(&lines, 0).len(), 2);
    }
}
