//! Markup-aware scanning for highlightable words.
//!
//! Text is split into markup tags (`<...>`), character entities (`&...;`) and
//! plain text. Only words in plain text are candidates for highlighting, and
//! words already inside an element with the highlight tag name are skipped.
//!
//! A `<` directly followed by a letter, `/`, `!` or `?` opens a tag that runs
//! to the next `>`, in plain-text descriptions too. In `a<b then c>d` only `a`
//! and `d` are words.

use std::ops::Range;

use sift_query::WordStemmer;

/// A word found in the plain-text parts of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedWord {
    /// Byte range of the word.
    pub span: Range<usize>,
    /// Lower-cased word text.
    pub lower: String,
    /// Whether the word already sits inside a highlight element.
    pub highlighted: bool,
    /// Whether only whitespace and punctuation separate this word from the previous one.
    pub joined: bool,
}

/// A highlightable match: a byte range and the pattern that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range of the matched text.
    pub range: Range<usize>,
    /// Index of the matching pattern.
    pub pattern: usize,
}

/// Returns true if `ch` is part of a word.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Scans `text` for words, tracking elements named `tag` (case-insensitive).
pub fn scan_words(text: &str, tag: Option<&str>) -> Vec<ScannedWord> {
    let bytes = text.as_bytes();
    let mut words = Vec::new();
    let mut depth: usize = 0;
    let mut joined = false;
    let mut pos = 0;

    while pos < text.len() {
        if bytes[pos] == b'<'
            && let Some(end) = markup_tag_end(text, pos)
        {
            if let Some(tag) = tag {
                match element_name(&text[pos..end]) {
                    Some((name, false)) if name.eq_ignore_ascii_case(tag) => depth += 1,
                    Some((name, true)) if name.eq_ignore_ascii_case(tag) => {
                        depth = depth.saturating_sub(1);
                    }
                    _ => {}
                }
            }
            joined = false;
            pos = end;
            continue;
        }

        if bytes[pos] == b'&'
            && let Some(end) = entity_end(text, pos)
        {
            joined = false;
            pos = end;
            continue;
        }

        let Some(ch) = text[pos..].chars().next() else {
            break;
        };

        if is_word_char(ch) {
            let end = text[pos..]
                .char_indices()
                .find(|(_, c)| !is_word_char(*c))
                .map_or(text.len(), |(offset, _)| pos + offset);
            words.push(ScannedWord {
                span: pos..end,
                lower: text[pos..end].to_lowercase(),
                highlighted: depth > 0,
                joined,
            });
            joined = true;
            pos = end;
        } else {
            pos += ch.len_utf8();
        }
    }

    words
}

/// Finds pattern matches among scanned words.
///
/// Each pattern is a list of lower-cased words; earlier patterns win at a
/// given position. Multi-word patterns only match words joined by plain text.
/// With a stemmer, a word also matches a pattern word with the same stem.
pub fn find_spans(
    words: &[ScannedWord],
    patterns: &[Vec<String>],
    stemmer: Option<&dyn WordStemmer>,
) -> Vec<Span> {
    let word_stems: Vec<String> = stemmer.map_or_else(Vec::new, |stemmer| {
        words.iter().map(|w| stemmer.stem(&w.lower)).collect()
    });
    let pattern_stems: Vec<Vec<String>> = stemmer.map_or_else(Vec::new, |stemmer| {
        patterns
            .iter()
            .map(|p| p.iter().map(|w| stemmer.stem(w)).collect())
            .collect()
    });
    let same = |at: usize, pattern: usize, k: usize| {
        if words[at].lower == patterns[pattern][k] {
            return true;
        }
        match (word_stems.get(at), pattern_stems.get(pattern).and_then(|p| p.get(k))) {
            (Some(word_stem), Some(pattern_stem)) => {
                !pattern_stem.is_empty() && word_stem == pattern_stem
            }
            _ => false,
        }
    };

    let mut spans = Vec::new();
    let mut i = 0;

    while i < words.len() {
        if words[i].highlighted {
            i += 1;
            continue;
        }

        let found = patterns.iter().enumerate().find(|(index, pattern)| {
            let len = pattern.len();
            i + len <= words.len()
                && (0..len).all(|k| {
                    let word = &words[i + k];
                    !word.highlighted && (k == 0 || word.joined) && same(i + k, *index, k)
                })
        });

        match found {
            Some((index, pattern)) => {
                let last = &words[i + pattern.len() - 1];
                spans.push(Span {
                    range: words[i].span.start..last.span.end,
                    pattern: index,
                });
                i += pattern.len();
            }
            None => i += 1,
        }
    }

    spans
}

/// Returns the end (exclusive) of a markup tag starting at `start`, if there is one.
///
/// A tag starts with `<` followed by a letter, `/`, `!` or `?`.
fn markup_tag_end(text: &str, start: usize) -> Option<usize> {
    let next = text[start + 1..].chars().next()?;
    if !(next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')) {
        return None;
    }
    text[start..].find('>').map(|offset| start + offset + 1)
}

/// Returns the end (exclusive) of a character entity starting at `start`, if there is one.
fn entity_end(text: &str, start: usize) -> Option<usize> {
    let rest = &text[start + 1..];
    let len = rest
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '#'))
        .map(|(offset, _)| offset)?;
    (len > 0 && rest[len..].starts_with(';')).then_some(start + 1 + len + 1)
}

/// Returns the element name of a tag and whether it is a closing tag.
///
/// Self-closing tags, comments and declarations have no name.
fn element_name(tag: &str) -> Option<(&str, bool)> {
    let inner = tag.strip_prefix('<')?.strip_suffix('>')?;
    if inner.ends_with('/') {
        return None;
    }
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    (!name.is_empty()).then_some((name, closing))
}
