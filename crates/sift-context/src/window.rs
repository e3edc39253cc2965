//! Excerpt windows: word ranges around matches, merged and ranked.

use std::{cmp::Reverse, collections::BTreeSet};

/// A match of one search pattern against a run of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Index of the first matched word.
    pub first: usize,
    /// Index of the last matched word (inclusive).
    pub last: usize,
    /// Which pattern matched.
    pub pattern: usize,
}

/// A run of words to show as one excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// First word index (inclusive).
    pub start: usize,
    /// Last word index (inclusive).
    pub end: usize,
    /// Distinct patterns matched inside the window.
    pub patterns: BTreeSet<usize>,
    /// Total matches inside the window.
    pub hits: usize,
}

impl Window {
    /// Ranking key: distinct patterns first, then total matches.
    pub fn score(&self) -> (usize, usize) {
        (self.patterns.len(), self.hits)
    }
}

/// Builds one window per match and merges windows that overlap or touch.
///
/// `word_count` bounds the windows; matches must be sorted by position.
pub fn build_windows(
    matches: &[Match],
    before: usize,
    after: usize,
    word_count: usize,
) -> Vec<Window> {
    let mut merged: Vec<Window> = Vec::new();
    let last_word = word_count.saturating_sub(1);

    for m in matches {
        let start = m.first.saturating_sub(before);
        let end = m.last.saturating_add(after).min(last_word);

        match merged.last_mut() {
            Some(current) if start <= current.end + 1 => {
                current.end = current.end.max(end);
                current.patterns.insert(m.pattern);
                current.hits += 1;
            }
            _ => merged.push(Window {
                start,
                end,
                patterns: BTreeSet::from([m.pattern]),
                hits: 1,
            }),
        }
    }

    merged
}

/// Keeps the `limit` best windows (0 keeps all) and returns them in document order.
///
/// Ties go to the window that appears first.
pub fn select_best(mut windows: Vec<Window>, limit: usize) -> Vec<Window> {
    if limit > 0 && windows.len() > limit {
        windows.sort_by_key(|w| (Reverse(w.score()), w.start));
        windows.truncate(limit);
        windows.sort_by_key(|w| w.start);
    }
    windows
}
