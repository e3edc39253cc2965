//! Index errors.

use std::{
    io,
    path::{Path, PathBuf},
};

use sift_config::ConfigError;
use tantivy::TantivyError;
use thiserror::Error;

/// Errors from building or opening the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index directory is missing or does not hold a usable index.
    #[error("cannot open index at {path}: {message}")]
    OpenIndex {
        /// The index directory.
        path: PathBuf,
        /// Why it could not be opened.
        message: String,
    },

    /// Tantivy failed while the index was open.
    #[error("index {action} failed: {source}")]
    Tantivy {
        /// What was being done, e.g. "commit".
        action: &'static str,
        /// Tantivy's error.
        source: TantivyError,
    },

    /// A source document could not be read.
    #[error("{path}: {message}")]
    Document {
        /// The document.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Filesystem error outside Tantivy.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Index paths could not be resolved from the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured stemmer names no supported language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),
}

impl IndexError {
    /// An [`IndexError::OpenIndex`] for `path`.
    pub fn open_index(path: &Path, source: &TantivyError) -> Self {
        Self::OpenIndex {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Returns a mapper from Tantivy errors to [`IndexError::Tantivy`], for `map_err`.
    pub fn during(action: &'static str) -> impl FnOnce(TantivyError) -> Self {
        move |source| Self::Tantivy { action, source }
    }
}
