//! Index status detection.

use std::path::Path;

use sift_config::Config;

use crate::search::Searcher;

/// Status of the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// Index exists and can be searched.
    Ready {
        /// Number of indexed documents.
        documents: u64,
    },
    /// No index has been built.
    Missing,
    /// Index files exist but cannot be opened.
    Broken {
        /// Why the index could not be opened.
        message: String,
    },
}

impl IndexStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> String {
        match self {
            Self::Ready { documents: 1 } => "ready (1 document)".to_string(),
            Self::Ready { documents } => format!("ready ({documents} documents)"),
            Self::Missing => "missing".to_string(),
            Self::Broken { message } => format!("unreadable: {message}"),
        }
    }

    /// Returns true if the index can be searched.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Returns true if `index_dir` holds an index.
pub fn index_exists(index_dir: &Path) -> bool {
    index_dir.join("meta.json").exists()
}

/// Determines the current status of the configured index.
pub fn detect_index_status(config: &Config) -> IndexStatus {
    let Ok(index_dir) = config.index_dir() else {
        return IndexStatus::Missing;
    };
    if !index_exists(&index_dir) {
        return IndexStatus::Missing;
    }
    match Searcher::open_with_config(config) {
        Ok(searcher) => IndexStatus::Ready {
            documents: searcher.num_docs(),
        },
        Err(e) => IndexStatus::Broken {
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::indexer::{Indexer, SilentReporter};

    fn config(temp: &TempDir) -> Config {
        let config_file = temp.path().join(".sift.toml");
        fs::write(&config_file, "").unwrap();
        Config::load_from_file(&config_file).unwrap()
    }

    #[test]
    fn missing_before_indexing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(detect_index_status(&config(&temp)), IndexStatus::Missing);
        assert_eq!(detect_index_status(&Config::default()), IndexStatus::Missing);
    }

    #[test]
    fn ready_after_indexing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "Alpha").unwrap();
        let config = config(&temp);
        Indexer::new(&config).unwrap().rebuild(&mut SilentReporter).unwrap();

        let status = detect_index_status(&config);
        assert_eq!(status, IndexStatus::Ready { documents: 1 });
        assert_eq!(status.description(), "ready (1 document)");
        assert!(status.is_ready());
    }

    #[test]
    fn descriptions() {
        assert_eq!(IndexStatus::Missing.description(), "missing");
        assert_eq!(IndexStatus::Ready { documents: 3 }.description(), "ready (3 documents)");
    }
}
