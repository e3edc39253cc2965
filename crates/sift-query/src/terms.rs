//! Search-term extraction from raw keyword queries.
//!
//! A [`TermSet`] is what the result pipeline matches against document text: the
//! bare words of the query with boolean operators and stop words removed, their
//! stems, and the quoted phrases.

use serde::Serialize;

use crate::{stem::WordStemmer, stopwords::Stopwords};

/// Returns true if `word` is a boolean operator keyword.
pub fn is_operator(word: &str) -> bool {
    ["and", "or", "not"]
        .iter()
        .any(|op| word.eq_ignore_ascii_case(op))
}

/// Terms, stems and phrases derived from one query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermSet {
    /// Bare terms in order of first appearance, case preserved.
    terms: Vec<String>,
    /// Stems of the bare terms, deduplicated.
    stems: Vec<String>,
    /// Quoted phrases in order of appearance, case preserved.
    phrases: Vec<String>,
}

impl TermSet {
    /// Extracts terms and phrases from a raw query.
    ///
    /// Quoted substrings become phrases. The remainder is split on whitespace;
    /// grouping parentheses, negation dashes and `name=` prefixes are trimmed,
    /// operators and stop words dropped. Never fails: an empty or
    /// operator-only query gives an empty set.
    pub fn extract(raw_query: &str, stop_words: &Stopwords, stemmer: &dyn WordStemmer) -> Self {
        let (phrases, remainder) = split_phrases(raw_query);

        let mut set = Self {
            phrases,
            ..Self::default()
        };

        for token in remainder.split_whitespace() {
            let Some(word) = clean_token(token) else {
                continue;
            };
            if is_operator(word) || stop_words.contains(word) {
                continue;
            }
            push_unique(&mut set.terms, word);
        }

        for term in &set.terms {
            let stem = stemmer.stem(term);
            if !stem.is_empty() {
                push_unique(&mut set.stems, &stem);
            }
        }

        set
    }

    /// Returns the bare terms, case preserved.
    pub fn bare_terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the stems of the bare terms.
    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    /// Returns the union of bare terms and stems.
    pub fn terms(&self) -> Vec<String> {
        let mut out = self.terms.clone();
        for stem in &self.stems {
            push_unique(&mut out, stem);
        }
        out
    }

    /// Returns the quoted phrases in order of appearance.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Returns phrases followed by terms, the input for context extraction
    /// and highlighting.
    pub fn highlight_terms(&self) -> Vec<String> {
        let mut out = self.phrases.clone();
        for term in self.terms() {
            push_unique(&mut out, &term);
        }
        out
    }

    /// Returns true if no terms or phrases were extracted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.phrases.is_empty()
    }

    /// Renders the set back into a query that extracts to the same set.
    pub fn to_query_string(&self) -> String {
        self.phrases
            .iter()
            .map(|p| format!("\"{p}\""))
            .chain(self.terms.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits quoted phrases out of `raw`, returning the phrases and the unquoted remainder.
///
/// An unmatched trailing quote is discarded and the text after it stays unquoted.
fn split_phrases(raw: &str) -> (Vec<String>, String) {
    let segments: Vec<&str> = raw.split('"').collect();
    let closed = if segments.len() % 2 == 0 {
        segments.len() - 1
    } else {
        segments.len()
    };

    let mut phrases: Vec<String> = Vec::new();
    let mut remainder = String::new();

    for (i, segment) in segments.iter().enumerate() {
        if i % 2 == 1 && i < closed {
            let phrase = segment.split_whitespace().collect::<Vec<_>>().join(" ");
            if !phrase.is_empty() && !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        } else {
            remainder.push(' ');
            remainder.push_str(segment);
        }
    }

    (phrases, remainder)
}

/// Strips query syntax from a whitespace-delimited token.
///
/// Everything up to the last `=` is a property name.
fn clean_token(token: &str) -> Option<&str> {
    let token = token.trim_matches(|c| c == '(' || c == ')');
    let token = token.trim_start_matches('-');
    let token = match token.rsplit_once('=') {
        Some((_, value)) => value,
        None => token,
    };
    let token = token.trim_matches(|c| c == '(' || c == ')');
    (!token.is_empty()).then_some(token)
}

/// Appends `word` unless an equal word (ignoring case) is already present.
fn push_unique(list: &mut Vec<String>, word: &str) {
    let lower = word.to_lowercase();
    if !list.iter().any(|w| w.to_lowercase() == lower) {
        list.push(word.to_string());
    }
}
