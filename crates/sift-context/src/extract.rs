//! Context extraction: the best excerpts of a text around matched terms.

use std::cmp::Reverse;

use sift_config::{ContextFormat, ContextSettings};
use sift_query::{WordStemmer, is_operator};

use crate::{
    escape::escape_html,
    window::{Match, Window, build_windows, select_best},
    words::{Word, is_word_char, tokenize},
};

/// One search pattern, split into lower-cased words.
#[derive(Debug)]
struct Pattern {
    /// Lower-cased words of the term or phrase.
    words: Vec<String>,
    /// Stems of `words` when a stemmer is attached.
    stems: Vec<String>,
}

/// Extracts excerpts of surrounding words around matched terms and phrases.
///
/// Matching is case-insensitive. Phrases match as contiguous words and take
/// priority over single terms. With a stemmer attached, words also match
/// when their stems are equal.
pub struct ContextExtractor<'a> {
    /// Window sizes, excerpt limit and output format.
    settings: ContextSettings,
    /// Optional stemmer for stem-equality matches.
    stemmer: Option<&'a dyn WordStemmer>,
}

impl<'a> ContextExtractor<'a> {
    /// Creates an extractor with the given settings.
    pub fn new(settings: ContextSettings) -> Self {
        Self {
            settings,
            stemmer: None,
        }
    }

    /// Attaches a stemmer so that inflected forms match.
    pub fn with_stemmer(mut self, stemmer: &'a dyn WordStemmer) -> Self {
        self.stemmer = Some(stemmer);
        self
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Returns excerpts of `text` around `terms_and_phrases`.
    ///
    /// Returns `text` unchanged when extraction is disabled, when no
    /// non-operator terms are given, or when nothing matches.
    pub fn extract(&self, text: &str, terms_and_phrases: &[String]) -> String {
        if text.is_empty() {
            return String::new();
        }

        let patterns = self.patterns(terms_and_phrases);
        if !self.settings.enabled || patterns.is_empty() {
            return text.to_string();
        }

        let words = tokenize(text);
        let word_stems: Vec<String> = match self.stemmer {
            Some(stemmer) => words.iter().map(|w| stemmer.stem(&w.lower)).collect(),
            None => Vec::new(),
        };

        let matches = find_matches(&words, &word_stems, &patterns);
        if matches.is_empty() {
            return text.to_string();
        }

        let windows = build_windows(
            &matches,
            self.settings.words_before,
            self.settings.words_after,
            words.len(),
        );
        let windows = select_best(windows, self.settings.max_excerpts);

        self.render(text, &words, &windows)
    }

    /// Builds match patterns: phrases (longest first) then single terms.
    fn patterns(&self, terms_and_phrases: &[String]) -> Vec<Pattern> {
        let mut patterns: Vec<Pattern> = Vec::new();

        for term in terms_and_phrases {
            if is_operator(term.trim()) {
                continue;
            }
            let words: Vec<String> = tokenize(term).into_iter().map(|w| w.lower).collect();
            if words.is_empty() || patterns.iter().any(|p| p.words == words) {
                continue;
            }
            let stems = match self.stemmer {
                Some(stemmer) => words.iter().map(|w| stemmer.stem(w)).collect(),
                None => Vec::new(),
            };
            patterns.push(Pattern { words, stems });
        }

        patterns.sort_by_key(|p| Reverse(p.words.len()));
        patterns
    }

    /// Renders windows as text slices joined by the ellipsis marker.
    fn render(&self, text: &str, words: &[Word], windows: &[Window]) -> String {
        let ellipsis = self.settings.ellipsis.as_str();
        let mut out = String::new();
        let mut previous_end = 0;

        for (i, window) in windows.iter().enumerate() {
            let start = words[window.start].span.start;
            let end = extend_to_whitespace(text, words[window.end].span.end);

            if i > 0 || has_words(&text[previous_end..start]) {
                out.push_str(ellipsis);
            }

            let slice = &text[start..end];
            match self.settings.format {
                ContextFormat::Text => out.push_str(slice),
                ContextFormat::Html => out.push_str(&escape_html(slice)),
            }
            previous_end = end;
        }

        if has_words(&text[previous_end..]) {
            out.push_str(ellipsis);
        }

        out
    }
}

/// Scans `words` left to right, taking the first (longest) pattern matching at each position.
fn find_matches(words: &[Word], word_stems: &[String], patterns: &[Pattern]) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let found = patterns.iter().enumerate().find(|(_, pattern)| {
            let len = pattern.words.len();
            i + len <= words.len()
                && (0..len).all(|k| word_matches(words, word_stems, i + k, pattern, k))
        });

        match found {
            Some((index, pattern)) => {
                let len = pattern.words.len();
                matches.push(Match {
                    first: i,
                    last: i + len - 1,
                    pattern: index,
                });
                i += len;
            }
            None => i += 1,
        }
    }

    matches
}

/// Checks word `at` of the text against word `k` of a pattern.
fn word_matches(
    words: &[Word],
    word_stems: &[String],
    at: usize,
    pattern: &Pattern,
    k: usize,
) -> bool {
    if words[at].lower == pattern.words[k] {
        return true;
    }
    match (word_stems.get(at), pattern.stems.get(k)) {
        (Some(word_stem), Some(pattern_stem)) => {
            !pattern_stem.is_empty() && word_stem == pattern_stem
        }
        _ => false,
    }
}

/// Extends a byte offset over punctuation attached to the preceding word.
fn extend_to_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace() || is_word_char(*ch))
        .map_or(text.len(), |(offset, _)| from + offset)
}

/// Returns true if `text` contains at least one word character.
fn has_words(text: &str) -> bool {
    text.chars().any(is_word_char)
}
