//! Turns raw index hits into display hits.

use sift_config::ResultsSettings;
use sift_context::ContextExtractor;
use sift_highlight::Highlight;
use sift_query::{TermSet, WordStemmer};

use crate::{
    format::{format_bytes, format_date},
    hit::{DisplayHit, ExtraProperty, RawHit},
    observer::SearchObserver,
};

/// Builds one page of display hits.
///
/// Each description goes through context extraction, then highlighting, then
/// truncation, as enabled by [`ResultsSettings`]. Truncation counts characters
/// of the final text, markup included, so a cut can land inside a highlight
/// tag.
pub struct ResultAssembler<'a> {
    /// Page size, description switches and extra properties.
    settings: ResultsSettings,
    /// Excerpt builder.
    context: ContextExtractor<'a>,
    /// Term marker.
    highlighter: &'a dyn Highlight,
    /// Receives highlight fallbacks.
    observer: &'a dyn SearchObserver,
    /// Lets the highlighter mark inflected forms.
    stemmer: Option<&'a dyn WordStemmer>,
}

impl<'a> ResultAssembler<'a> {
    /// Creates an assembler.
    pub fn new(
        settings: ResultsSettings,
        context: ContextExtractor<'a>,
        highlighter: &'a dyn Highlight,
        observer: &'a dyn SearchObserver,
    ) -> Self {
        Self {
            settings,
            context,
            highlighter,
            observer,
            stemmer: None,
        }
    }

    /// Highlights words whose stem matches a term's stem.
    pub fn with_stemmer(mut self, stemmer: &'a dyn WordStemmer) -> Self {
        self.stemmer = Some(stemmer);
        self
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &ResultsSettings {
        &self.settings
    }

    /// Assembles at most `page_size` hits; 0 means no limit.
    ///
    /// Items past the limit are never pulled from `hits`.
    pub fn assemble<I>(&self, hits: I, terms: &TermSet) -> Vec<DisplayHit>
    where
        I: IntoIterator<Item = RawHit>,
    {
        let limit = match self.settings.page_size {
            0 => usize::MAX,
            n => n,
        };
        let patterns = terms.highlight_terms();

        hits.into_iter()
            .take(limit)
            .map(|hit| self.display_hit(hit, &patterns))
            .collect()
    }

    /// Builds the display form of one hit.
    pub fn display_hit(&self, hit: RawHit, patterns: &[String]) -> DisplayHit {
        let description = match hit.description.as_deref() {
            Some(text) if !text.is_empty() => self.description(&hit.path, text, patterns),
            _ => String::new(),
        };

        let extra = self
            .settings
            .extra_properties
            .iter()
            .map(|name| ExtraProperty {
                name: name.clone(),
                value: hit.properties.get(name).cloned(),
            })
            .collect();

        DisplayHit {
            size: hit.size.map(format_bytes).unwrap_or_default(),
            date: hit.last_modified.map(format_date).unwrap_or_default(),
            path: hit.path,
            title: hit.title,
            rank: hit.rank,
            record_count: hit.record_count,
            description,
            extra,
        }
    }

    /// Runs the description pipeline for one non-empty description.
    fn description(&self, path: &str, text: &str, patterns: &[String]) -> String {
        let mut text = if self.settings.description_context {
            self.context.extract(text, patterns)
        } else {
            text.to_string()
        };

        if self.settings.highlight {
            let marked = match self.stemmer {
                Some(stemmer) => self.highlighter.highlight_stemmed(&text, patterns, stemmer),
                None => self.highlighter.highlight(&text, patterns),
            };
            match marked {
                Ok(marked) => text = marked,
                Err(e) => self.observer.highlight_unavailable(path, &e),
            }
        }

        truncate_chars(&text, self.settings.description_length)
    }
}

/// Keeps the first `max` characters of `text`; 0 keeps everything.
fn truncate_chars(text: &str, max: usize) -> String {
    if max == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
