//! Word stemming capability.

/// Reduces a word to its stem.
///
/// The index that produced the hits supplies the implementation so that query
/// terms stem exactly as indexed text did.
pub trait WordStemmer: Send + Sync {
    /// Returns the stem of `word`, or an empty string if it has none.
    fn stem(&self, word: &str) -> String;
}

/// A stemmer that returns words lower-cased and otherwise unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStemmer;

impl WordStemmer for NoStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_lowercase()
    }
}

impl<F> WordStemmer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn stem(&self, word: &str) -> String {
        self(word)
    }
}
