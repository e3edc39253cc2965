//! sift: full-text search over a directory of documents.
//!
//! sift indexes markdown, HTML and plain-text files under a document root and
//! answers boolean keyword queries with paged results. Each result carries
//! excerpts around the matched words, with the search terms highlighted.

#![warn(missing_docs)]

pub mod cli;
