//! Highlight markup for matched search terms.

use std::{cmp::Reverse, collections::HashMap};

use sift_config::HighlightSettings;
use sift_query::{WordStemmer, is_operator};
use thiserror::Error;

use crate::scan::{Span, find_spans, scan_words};

/// Highlighting could not be performed; callers fall back to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("highlighting unavailable: {reason}")]
pub struct HighlightUnavailable {
    /// Why highlighting failed.
    pub reason: String,
}

impl HighlightUnavailable {
    /// Creates the error with a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Marks matched terms and phrases in a piece of text.
pub trait Highlight {
    /// Returns `text` with every match of `terms_and_phrases` marked.
    fn highlight(
        &self,
        text: &str,
        terms_and_phrases: &[String],
    ) -> Result<String, HighlightUnavailable>;

    /// Like [`highlight`](Self::highlight), also marking words whose stem
    /// equals the stem of a term word.
    ///
    /// The default ignores the stemmer.
    fn highlight_stemmed(
        &self,
        text: &str,
        terms_and_phrases: &[String],
        _stemmer: &dyn WordStemmer,
    ) -> Result<String, HighlightUnavailable> {
        self.highlight(text, terms_and_phrases)
    }
}

/// Wraps matches in an HTML-style element.
///
/// The opening tag carries the configured class, or, without a class, a
/// background color chosen round-robin per distinct matched term.
#[derive(Debug, Clone)]
pub struct Highlighter {
    /// Element name and styling.
    settings: HighlightSettings,
}

impl Highlighter {
    /// Creates a highlighter.
    pub fn new(settings: HighlightSettings) -> Self {
        Self { settings }
    }

    /// Returns `text` with matches wrapped in the highlight element.
    ///
    /// Markup and entities in `text` are left alone, and words already inside
    /// the highlight element are not wrapped again.
    pub fn mark(&self, text: &str, terms_and_phrases: &[String]) -> String {
        self.mark_with(text, terms_and_phrases, None)
    }

    /// [`mark`](Self::mark), also matching words by stem when `stemmer` is given.
    pub fn mark_with(
        &self,
        text: &str,
        terms_and_phrases: &[String],
        stemmer: Option<&dyn WordStemmer>,
    ) -> String {
        let tag = self.settings.tag.trim();
        if tag.is_empty() {
            return text.to_string();
        }

        let patterns = patterns(terms_and_phrases);
        if patterns.is_empty() {
            return text.to_string();
        }

        let spans = find_spans(&scan_words(text, Some(tag)), &patterns, stemmer);
        let close = format!("</{tag}>");
        let colors = &self.settings.colors;

        if !self.settings.class.is_empty() || colors.is_empty() {
            let open = if self.settings.class.is_empty() {
                format!("<{tag}>")
            } else {
                format!("<{tag} class=\"{}\">", escape_attribute(&self.settings.class))
            };
            return wrap_spans(text, &spans, |_| open.clone(), &close);
        }

        // Colors follow the order in which distinct patterns first appear
        let mut assigned: HashMap<usize, usize> = HashMap::new();
        for span in &spans {
            let next = assigned.len();
            assigned.entry(span.pattern).or_insert(next);
        }
        wrap_spans(
            text,
            &spans,
            |pattern| {
                let slot = assigned.get(&pattern).copied().unwrap_or(0) % colors.len();
                format!(
                    "<{tag} style=\"background:{}\">",
                    escape_attribute(&colors[slot])
                )
            },
            &close,
        )
    }
}

impl Highlight for Highlighter {
    fn highlight(
        &self,
        text: &str,
        terms_and_phrases: &[String],
    ) -> Result<String, HighlightUnavailable> {
        Ok(self.mark(text, terms_and_phrases))
    }

    fn highlight_stemmed(
        &self,
        text: &str,
        terms_and_phrases: &[String],
        stemmer: &dyn WordStemmer,
    ) -> Result<String, HighlightUnavailable> {
        Ok(self.mark_with(text, terms_and_phrases, Some(stemmer)))
    }
}

/// Splits terms into lower-cased word patterns, phrases first and longest first.
///
/// Boolean operators and duplicates are dropped.
pub fn patterns(terms_and_phrases: &[String]) -> Vec<Vec<String>> {
    let mut patterns: Vec<Vec<String>> = Vec::new();

    for term in terms_and_phrases {
        let words: Vec<String> = term
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() || (words.len() == 1 && is_operator(&words[0])) {
            continue;
        }
        if !patterns.contains(&words) {
            patterns.push(words);
        }
    }

    patterns.sort_by_key(|p| Reverse((p.len(), p.iter().map(String::len).sum::<usize>())));
    patterns
}

/// Copies `text`, wrapping each span in `open(pattern)` and `close`.
pub fn wrap_spans<F>(text: &str, spans: &[Span], open: F, close: &str) -> String
where
    F: Fn(usize) -> String,
{
    let mut out = String::with_capacity(text.len() + spans.len() * 16);
    let mut pos = 0;

    for span in spans {
        out.push_str(&text[pos..span.range.start]);
        out.push_str(&open(span.pattern));
        out.push_str(&text[span.range.clone()]);
        out.push_str(close);
        pos = span.range.end;
    }

    out.push_str(&text[pos..]);
    out
}

/// Escapes a value for use inside a double-quoted attribute.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn highlighter(tag: &str, class: &str, colors: &[&str]) -> Highlighter {
        Highlighter::new(HighlightSettings {
            tag: tag.into(),
            class: class.into(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        })
    }

    fn default_highlighter() -> Highlighter {
        Highlighter::new(HighlightSettings::default())
    }

    #[test]
    fn wraps_terms_case_insensitively() {
        let out = default_highlighter().mark("Please help, PANIC now", &terms(&["panic", "please"]));
        assert_eq!(
            out,
            "<strong>Please</strong> help, <strong>PANIC</strong> now"
        );
    }

    #[test]
    fn whole_words_only() {
        let out = default_highlighter().mark("panicking panic", &terms(&["panic"]));
        assert_eq!(out, "panicking <strong>panic</strong>");
    }

    #[test]
    fn inflections_match_with_a_stemmer() {
        let strip = |w: &str| w.trim_end_matches("ing").trim_end_matches("ed").to_string();
        let hl = default_highlighter();
        let list = terms(&["panicking"]);
        assert_eq!(hl.mark("they panicked", &list), "they panicked");
        assert_eq!(
            hl.highlight_stemmed("they panicked", &list, &strip).unwrap(),
            "they <strong>panicked</strong>"
        );
    }

    #[test]
    fn phrases_wrapped_as_a_unit() {
        let out = default_highlighter().mark(
            "please help me, please",
            &terms(&["please", "please help"]),
        );
        assert_eq!(
            out,
            "<strong>please help</strong> me, <strong>please</strong>"
        );
    }

    #[test]
    fn operators_never_highlighted() {
        let out = default_highlighter().mark("this and that or not", &terms(&["and", "or", "not", "that"]));
        assert_eq!(out, "this and <strong>that</strong> or not");
    }

    #[test]
    fn class_overrides_colors() {
        let out = highlighter("mark", "hit", &["red"]).mark("a panic b", &terms(&["panic"]));
        assert_eq!(out, "a <mark class=\"hit\">panic</mark> b");
    }

    #[test]
    fn colors_rotate_per_distinct_term() {
        let out = highlighter("span", "", &["#ff0", "#0ff"]).mark(
            "b a b c",
            &terms(&["a", "b", "c"]),
        );
        assert_eq!(
            out,
            "<span style=\"background:#ff0\">b</span> \
             <span style=\"background:#0ff\">a</span> \
             <span style=\"background:#ff0\">b</span> \
             <span style=\"background:#ff0\">c</span>"
        );
    }

    #[test]
    fn markup_and_entities_untouched() {
        let text = "<a href=\"/please\" title=\"help\">please</a> &amp; help&nbsp;";
        let out = default_highlighter().mark(text, &terms(&["please", "help", "amp", "nbsp", "href"]));
        assert_eq!(
            out,
            "<a href=\"/please\" title=\"help\"><strong>please</strong></a> &amp; <strong>help</strong>&nbsp;"
        );
    }

    #[test]
    fn idempotent() {
        let hl = default_highlighter();
        let list = terms(&["please", "help", "please help"]);
        let once = hl.mark("Please help. Help me please!", &list);
        let twice = hl.mark(&once, &list);
        assert_eq!(once, twice);
    }

    #[test]
    fn non_matching_text_untouched() {
        let text = "a < b && c > d";
        assert_eq!(default_highlighter().mark(text, &terms(&["zebra"])), text);
    }

    #[test]
    fn empty_tag_disables() {
        let out = highlighter("", "", &[]).mark("panic", &terms(&["panic"]));
        assert_eq!(out, "panic");
    }

    #[test]
    fn trait_never_fails() {
        let hl: &dyn Highlight = &default_highlighter();
        assert_eq!(
            hl.highlight("panic", &terms(&["panic"])).unwrap(),
            "<strong>panic</strong>"
        );
    }

    #[test]
    fn attribute_values_escaped() {
        let out = highlighter("em", "a\"b", &[]).mark("x", &terms(&["x"]));
        assert_eq!(out, "<em class=\"a&quot;b\">x</em>");
    }
}
