//! Query handling for sift search.
//!
//! This crate covers both directions of a keyword query:
//!
//! - **Parsing**: a boolean query language with terms, `"quoted phrases"`,
//!   `AND`/`OR`/`NOT` (any case), `-term` negation, `(grouping)` and
//!   `name=value` property filters.
//! - **Term extraction**: [`TermSet`] reduces a raw query to the words and
//!   phrases that result post-processing matches against document text.
//! - **Generation**: [`QueryBuilder`] combines keywords and property filters
//!   into the string handed to an index.
//!
//! # Example
//!
//! ```
//! use sift_query::{NoStemmer, Stopwords, TermSet, parse};
//!
//! let expr = parse("\"please help\" or panic").unwrap();
//! assert!(expr.is_some());
//!
//! let terms = TermSet::extract("\"please help\" or panic", &Stopwords::basic(), &NoStemmer);
//! assert_eq!(terms.phrases(), ["please help"]);
//! ```

#![warn(missing_docs)]

mod ast;
mod builder;
mod error;
mod lexer;
mod parser;
mod stem;
mod stopwords;
mod terms;

pub use ast::QueryExpr;
pub use builder::{FilterParseError, PropertyFilter, QueryBuilder, QueryPolicy, StandardPolicy};
pub use error::{QueryError, QueryErrorKind};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::parse;
pub use stem::{NoStemmer, WordStemmer};
pub use stopwords::Stopwords;
pub use terms::{TermSet, is_operator};
