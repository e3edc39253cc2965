//! Tantivy-based document index for sift.
//!
//! This crate builds and searches the full-text index behind `sift search`.
//! It handles:
//! - Discovery of markdown, HTML and text files under the document root
//! - Extraction of titles, plain-text bodies and frontmatter or meta properties
//! - Index creation and full rebuilds
//! - Compilation of boolean queries to Tantivy queries
//! - A lazily-loading hit cursor for the result controller
//!
//! # Example
//!
//! ```no_run
//! use sift_config::Config;
//! use sift_index::{Indexer, Searcher, SilentReporter};
//! use sift_results::{HitCursor, IndexExecutor};
//!
//! let config = Config::load(".".as_ref()).unwrap();
//! Indexer::new(&config).unwrap().rebuild(&mut SilentReporter).unwrap();
//!
//! let searcher = Searcher::open_with_config(&config).unwrap();
//! let hits = searcher.execute("rust AND author=jane").unwrap();
//! println!("{} hits", hits.total());
//! ```

#![warn(missing_docs)]

mod analyzer;
mod compile;
mod discovery;
mod document;
mod error;
mod frontmatter;
mod indexer;
mod schema;
mod search;
mod status;
mod writer;

pub use analyzer::{
    IndexStemmer, SIFT_TOKENIZER, build_analyzer, build_analyzer_from_name, parse_language,
    resolve_language, stopwords_for,
};
pub use compile::{CompileError, QueryCompiler};
pub use discovery::{DiscoveredFile, discover_files};
pub use document::{DocumentKind, SourceDocument};
pub use error::IndexError;
pub use frontmatter::parse_frontmatter;
pub use indexer::{IndexStats, Indexer, ProgressReporter, SilentReporter};
pub use schema::{IndexSchema, boost, property_term};
pub use search::{SearchHits, Searcher};
pub use status::{IndexStatus, detect_index_status, index_exists};
pub use writer::IndexWriter;
