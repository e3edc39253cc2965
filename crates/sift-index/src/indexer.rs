//! Full indexing pipeline.
//!
//! The [`Indexer`] rebuilds the index from scratch:
//! 1. Discover files under the document root matching the patterns
//! 2. Convert each file into a [`SourceDocument`]
//! 3. Replace the index contents and commit

use std::path::{Path, PathBuf};

use sift_config::{CompiledPatterns, Config};
use tantivy::tokenizer::Language;
use tracing::{info, warn};

use crate::{
    IndexError,
    analyzer::{resolve_language, stopwords_for},
    discovery::{DiscoveredFile, discover_files},
    document::SourceDocument,
    writer::IndexWriter,
};

/// Statistics from an indexing run.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of files indexed.
    pub files_indexed: usize,
    /// Number of files skipped due to errors.
    pub files_skipped: usize,
    /// Errors encountered while reading files (file path, error message).
    pub errors: Vec<(PathBuf, String)>,
}

impl IndexStats {
    /// Returns true if no errors occurred.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Callback for reporting indexing progress.
pub trait ProgressReporter {
    /// Called when starting to process a file.
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize);

    /// Called when a file was successfully indexed.
    fn on_file_done(&mut self, path: &Path);

    /// Called when a file could not be indexed.
    fn on_file_error(&mut self, path: &Path, error: &str);

    /// Called when indexing is complete.
    fn on_complete(&mut self, stats: &IndexStats);
}

/// A reporter that ignores all progress.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_file_start(&mut self, _path: &Path, _current: usize, _total: usize) {}
    fn on_file_done(&mut self, _path: &Path) {}
    fn on_file_error(&mut self, _path: &Path, _error: &str) {}
    fn on_complete(&mut self, _stats: &IndexStats) {}
}

/// Builds the index for a configuration.
pub struct Indexer<'a> {
    /// The loaded configuration.
    config: &'a Config,
    /// Compiled include/exclude patterns.
    patterns: CompiledPatterns,
    /// Path to the index directory.
    index_dir: PathBuf,
    /// Directory the documents live in.
    document_root: PathBuf,
    /// Stemming language, if any.
    language: Option<Language>,
}

impl<'a> Indexer<'a> {
    /// Creates a new indexer for the given configuration.
    ///
    /// Fails when the index or document location cannot be resolved or the
    /// patterns do not compile.
    pub fn new(config: &'a Config) -> Result<Self, IndexError> {
        Ok(Self {
            config,
            patterns: config.compile_patterns()?,
            index_dir: config.index_dir()?,
            document_root: config.document_root()?,
            language: resolve_language(&config.index.stemmer),
        })
    }

    /// Reindexes every document, replacing the previous index contents.
    ///
    /// Files that cannot be read are reported and skipped.
    pub fn rebuild<R: ProgressReporter>(&self, reporter: &mut R) -> Result<IndexStats, IndexError> {
        let files = discover_files(&self.document_root, &self.patterns)?;
        let stop_words = stopwords_for(self.config.index.stopwords);
        let mut writer = IndexWriter::open(&self.index_dir, self.language, &stop_words)?;
        writer.delete_all()?;

        let mut stats = IndexStats::default();
        let total = files.len();
        for (idx, file) in files.iter().enumerate() {
            reporter.on_file_start(&file.rel_path, idx + 1, total);
            match index_file(&mut writer, file) {
                Ok(()) => {
                    stats.files_indexed += 1;
                    reporter.on_file_done(&file.rel_path);
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!(path = %file.rel_path.display(), error = %message, "skipping file");
                    stats.files_skipped += 1;
                    reporter.on_file_error(&file.rel_path, &message);
                    stats.errors.push((file.rel_path.clone(), message));
                }
            }
        }

        writer.commit()?;
        info!(
            indexed = stats.files_indexed,
            skipped = stats.files_skipped,
            index = %self.index_dir.display(),
            "index rebuilt"
        );
        reporter.on_complete(&stats);
        Ok(stats)
    }

    /// Returns the path to the index directory.
    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// Returns the document root.
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }
}

/// Reads one file and stages it in the writer.
fn index_file(writer: &mut IndexWriter, file: &DiscoveredFile) -> Result<(), IndexError> {
    let doc = SourceDocument::load(file)?;
    writer.add_document(&doc)
}
