//! Word tokenization with byte spans.

use std::ops::Range;

/// A word in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Byte range of the word in the source text.
    pub span: Range<usize>,
    /// Lower-cased word text.
    pub lower: String,
}

/// Returns true if `ch` is part of a word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Splits `text` into words: maximal runs of alphanumeric characters and `_`.
pub fn tokenize(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match (is_word_char(ch), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                words.push(word(text, s..i));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        words.push(word(text, s..text.len()));
    }

    words
}

/// Builds a word from a span of `text`.
fn word(text: &str, span: Range<usize>) -> Word {
    Word {
        lower: text[span.clone()].to_lowercase(),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowers(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|w| w.lower).collect()
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(lowers("Please, help!  me"), vec!["please", "help", "me"]);
    }

    #[test]
    fn spans_are_bytes() {
        let words = tokenize("café au_lait");
        assert_eq!(words[0].span, 0..5);
        assert_eq!(words[1].span, 6..13);
        assert_eq!(words[1].lower, "au_lait");
    }

    #[test]
    fn empty_and_symbol_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" -- !! ").is_empty());
    }
}
