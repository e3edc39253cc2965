//! Search-term highlighting and terminal colors for sift.
//!
//! [`Highlighter`] wraps matched terms and phrases of a result description in
//! HTML-style markup without disturbing existing tags or entities.
//! [`TerminalHighlighter`] does the same with ANSI colors for the command
//! line. Both implement the [`Highlight`] trait, which is how the result
//! pipeline consumes them.

#![warn(missing_docs)]

mod markup;
mod scan;
mod terminal;

pub use markup::{Highlight, HighlightUnavailable, Highlighter};
pub use terminal::{
    SyntaxHighlighter, TerminalHighlighter, colors, dim, header, subheader, success, warning,
};
