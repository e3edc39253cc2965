//! ANSI styling for the command line.
//!
//! Search hits are marked bold yellow by [`TerminalHighlighter`]. Configuration
//! shown by `sift init` and `sift config` goes through [`SyntaxHighlighter`].

use sift_query::WordStemmer;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style, Theme},
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines,
    theme::{EmbeddedThemeName, extra},
};

use crate::{
    markup::{Highlight, HighlightUnavailable, patterns, wrap_spans},
    scan::{find_spans, scan_words},
};

/// ANSI escape sequences.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Green foreground.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Faint.
    pub const DIM: &str = "\x1b[2m";
    /// Clears all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Colors TOML (or any syntax `two-face` knows) for terminal display.
pub struct SyntaxHighlighter {
    /// Syntax definitions, TOML included.
    syntaxes: SyntaxSet,
    /// The Dracula theme.
    theme: Theme,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Loads the bundled syntaxes and the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntaxes: extra_newlines(),
            theme: extra().get(EmbeddedThemeName::Dracula).clone(),
        }
    }

    /// Colors TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Colors `content` as the syntax with extension or name `syntax`.
    ///
    /// Unknown syntaxes and lines the highlighter rejects come out uncolored.
    /// The output always ends with a reset.
    pub fn highlight(&self, content: &str, syntax: &str) -> String {
        let definition = self
            .syntaxes
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntaxes.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut lines = HighlightLines::new(definition, &self.theme);

        let mut out: String = LinesWithEndings::from(content)
            .map(|line| {
                let styled = lines
                    .highlight_line(line, &self.syntaxes)
                    .unwrap_or_else(|_| vec![(Style::default(), line)]);
                as_24_bit_terminal_escaped(&styled, false)
            })
            .collect();
        out.push_str(colors::RESET);
        out
    }
}

/// Marks matched terms bold yellow.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalHighlighter;

impl Highlight for TerminalHighlighter {
    fn highlight(
        &self,
        text: &str,
        terms_and_phrases: &[String],
    ) -> Result<String, HighlightUnavailable> {
        Ok(mark_terminal(text, terms_and_phrases, None))
    }

    fn highlight_stemmed(
        &self,
        text: &str,
        terms_and_phrases: &[String],
        stemmer: &dyn WordStemmer,
    ) -> Result<String, HighlightUnavailable> {
        Ok(mark_terminal(text, terms_and_phrases, Some(stemmer)))
    }
}

/// Wraps matches in bold yellow.
fn mark_terminal(
    text: &str,
    terms_and_phrases: &[String],
    stemmer: Option<&dyn WordStemmer>,
) -> String {
    let patterns = patterns(terms_and_phrases);
    if patterns.is_empty() {
        return text.to_string();
    }
    let spans = find_spans(&scan_words(text, None), &patterns, stemmer);
    let open = [colors::BOLD, colors::YELLOW].concat();
    wrap_spans(text, &spans, |_| open.clone(), colors::RESET)
}

/// Wraps `text` in `codes` and a reset.
fn paint(codes: &[&str], text: &str) -> String {
    format!("{}{text}{}", codes.concat(), colors::RESET)
}

/// Bold cyan, for the result count line.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Bold.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Faint, for secondary details.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Green.
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Yellow.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}
