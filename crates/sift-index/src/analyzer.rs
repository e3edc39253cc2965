//! Text analysis pipeline for the sift index.
//!
//! Documents and queries go through the same five stages:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//! 4. `StopWordFilter` - drops the configured stop words
//! 5. `Stemmer` - applies language-specific stemming
//!
//! The stemmer language and stop-word list come from the `[index]` section of
//! `.sift.toml`.

use sift_config::StopwordList;
use sift_query::{Stopwords, WordStemmer};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, TokenStream,
};
use tracing::warn;

use crate::IndexError;

/// Name of the custom tokenizer registered with Tantivy.
pub const SIFT_TOKENIZER: &str = "sift_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Parses a stemmer language string into a Tantivy `Language`.
///
/// `none` disables stemming and yields `None`.
pub fn parse_language(name: &str) -> Result<Option<Language>, IndexError> {
    let language = match name.to_lowercase().as_str() {
        "none" => return Ok(None),
        "arabic" => Language::Arabic,
        "danish" => Language::Danish,
        "dutch" => Language::Dutch,
        "english" => Language::English,
        "finnish" => Language::Finnish,
        "french" => Language::French,
        "german" => Language::German,
        "greek" => Language::Greek,
        "hungarian" => Language::Hungarian,
        "italian" => Language::Italian,
        "norwegian" => Language::Norwegian,
        "portuguese" => Language::Portuguese,
        "romanian" => Language::Romanian,
        "russian" => Language::Russian,
        "spanish" => Language::Spanish,
        "swedish" => Language::Swedish,
        "tamil" => Language::Tamil,
        "turkish" => Language::Turkish,
        other => return Err(IndexError::InvalidLanguage(other.to_string())),
    };
    Ok(Some(language))
}

/// Resolves a configured stemmer name, disabling stemming for unknown names.
pub fn resolve_language(name: &str) -> Option<Language> {
    parse_language(name).unwrap_or_else(|e| {
        warn!(error = %e, "stemming disabled");
        None
    })
}

/// Returns the stop words for a configured list.
pub fn stopwords_for(list: StopwordList) -> Stopwords {
    match list {
        StopwordList::Basic => Stopwords::basic(),
        StopwordList::Extended => Stopwords::extended(),
        StopwordList::None => Stopwords::none(),
    }
}

/// Builds the sift text analyzer; `None` skips the stemming stage.
pub fn build_analyzer(language: Option<Language>, stop_words: &Stopwords) -> TextAnalyzer {
    let builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(StopWordFilter::remove(stop_words.to_sorted_vec()));
    match language {
        Some(language) => builder.filter(Stemmer::new(language)).build(),
        None => builder.build(),
    }
}

/// Builds the sift text analyzer from a language name.
pub fn build_analyzer_from_name(
    language_name: &str,
    stop_words: &Stopwords,
) -> Result<TextAnalyzer, IndexError> {
    let language = parse_language(language_name)?;
    Ok(build_analyzer(language, stop_words))
}

/// Runs `text` through `analyzer` and collects the token texts.
pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}

/// Stems single words the way the index does.
///
/// Stop words are not removed, so every word has a stem.
#[derive(Clone)]
pub struct IndexStemmer {
    /// Lower-casing stemming analyzer without stop-word removal.
    analyzer: TextAnalyzer,
}

impl IndexStemmer {
    /// Creates a stemmer for a language; `None` only lower-cases.
    pub fn new(language: Option<Language>) -> Self {
        let builder = TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser);
        let analyzer = match language {
            Some(language) => builder.filter(Stemmer::new(language)).build(),
            None => builder.build(),
        };
        Self { analyzer }
    }
}

impl WordStemmer for IndexStemmer {
    fn stem(&self, word: &str) -> String {
        let mut analyzer = self.analyzer.clone();
        analyze(&mut analyzer, word)
            .into_iter()
            .next()
            .unwrap_or_else(|| word.to_lowercase())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn english() -> TextAnalyzer {
        build_analyzer(Some(Language::English), &Stopwords::basic())
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(parse_language("English").unwrap(), Some(Language::English));
        assert_eq!(parse_language("FRENCH").unwrap(), Some(Language::French));
        assert_eq!(parse_language("GeRmAn").unwrap(), Some(Language::German));
        assert_eq!(parse_language("none").unwrap(), None);
    }

    #[test]
    fn every_configured_language_parses() {
        for name in sift_config::STEMMER_LANGUAGES {
            assert!(parse_language(name).is_ok(), "failed to parse {name}");
        }
    }

    #[test]
    fn parse_invalid_language() {
        let err = parse_language("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn analyzer_lowercases_and_stems() {
        assert_eq!(analyze(&mut english(), "HANDLING Running"), vec!["handl", "run"]);
    }

    #[test]
    fn analyzer_removes_stop_words() {
        assert_eq!(analyze(&mut english(), "find the context"), vec!["find", "context"]);
        let mut keep_all = build_analyzer(Some(Language::English), &Stopwords::none());
        assert_eq!(analyze(&mut keep_all, "the"), vec!["the"]);
    }

    #[test]
    fn analyzer_removes_long_tokens() {
        let text = format!("short {} word", "a".repeat(50));
        assert_eq!(analyze(&mut english(), &text), vec!["short", "word"]);
    }

    #[test]
    fn analyzer_splits_punctuation() {
        assert_eq!(
            analyze(&mut english(), "hello, world! foo-bar"),
            vec!["hello", "world", "foo", "bar"]
        );
    }

    #[test]
    fn unknown_language_disables_stemming() {
        assert_eq!(resolve_language("klingon"), None);
        assert_eq!(resolve_language("english"), Some(Language::English));
    }

    #[test]
    fn build_from_invalid_name() {
        assert!(build_analyzer_from_name("invalid", &Stopwords::basic()).is_err());
    }

    #[test]
    fn stemmer_keeps_stop_words() {
        let stemmer = IndexStemmer::new(Some(Language::English));
        assert_eq!(stemmer.stem("Testing"), "test");
        assert_eq!(stemmer.stem("the"), "the");
        assert_eq!(stemmer.stem("..."), "...");
    }

    #[test]
    fn no_stemming() {
        let mut analyzer = build_analyzer(None, &Stopwords::basic());
        assert_eq!(analyze(&mut analyzer, "Running the tests"), vec!["running", "tests"]);
        assert_eq!(IndexStemmer::new(None).stem("Running"), "running");
    }

    #[test]
    fn stopword_lists() {
        assert!(stopwords_for(StopwordList::Basic).contains("the"));
        assert!(stopwords_for(StopwordList::None).is_empty());
        let basic = stopwords_for(StopwordList::Basic).len();
        assert!(stopwords_for(StopwordList::Extended).len() > basic);
    }
}
