//! Stop-word sets for term extraction and indexing.
//!
//! Stop words are dropped from the extracted term set and, when the index is
//! built with the same set, never reach the inverted index either.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Short English list used by default.
///
/// Kept small so that ordinary content words ("please", "help") stay searchable.
static BASIC_ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// A case-insensitive stop-word set.
///
/// All words are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    /// Lower-cased stop words.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::basic()
    }
}

impl Stopwords {
    /// The short English list.
    pub fn basic() -> Self {
        Self::from_words(BASIC_ENGLISH.iter().copied())
    }

    /// The full Stopwords ISO English list from the `stop-words` crate.
    pub fn extended() -> Self {
        Self::from_words(stop_words::get(LANGUAGE::English).iter().copied())
    }

    /// An empty set; nothing is treated as a stop word.
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Builds a set from arbitrary words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Checks if a word is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Returns the words in sorted order.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();
        words
    }

    /// Returns the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
