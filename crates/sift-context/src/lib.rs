//! Context excerpts for search results.
//!
//! Given a document description and the terms of a query, [`ContextExtractor`]
//! finds the passages where the terms occur and renders the best of them,
//! each with a configurable number of surrounding words:
//!
//! ```
//! use sift_config::ContextSettings;
//! use sift_context::ContextExtractor;
//!
//! let settings = ContextSettings {
//!     words_before: 1,
//!     words_after: 1,
//!     ..ContextSettings::default()
//! };
//! let extractor = ContextExtractor::new(settings);
//! let excerpt = extractor.extract("one two three four five", &["three".to_string()]);
//! assert_eq!(excerpt, "...two three four...");
//! ```

#![warn(missing_docs)]

mod escape;
mod extract;
mod window;
mod words;

pub use escape::escape_html;
pub use extract::ContextExtractor;
pub use words::{Word, tokenize};
