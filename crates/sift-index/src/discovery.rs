//! File discovery for indexing.
//!
//! Walks the document root to find files that should be indexed, applying
//! include/exclude patterns and skipping hidden entries, symlinks and
//! unsupported formats.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    time::SystemTime,
};

use sift_config::CompiledPatterns;
use tracing::debug;
use walkdir::WalkDir;

use crate::{IndexError, document::DocumentKind};

/// A file discovered for indexing.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the document root.
    pub rel_path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// File modification time.
    pub mtime: SystemTime,
}

/// Discovers the files under `root` that should be indexed, sorted by path.
///
/// A missing root yields no files. Entries that cannot be read are skipped.
pub fn discover_files(
    root: &Path,
    patterns: &CompiledPatterns,
) -> Result<Vec<DiscoveredFile>, IndexError> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        let Ok(rel_path) = abs_path.strip_prefix(root).map(Path::to_path_buf) else {
            continue;
        };

        if !patterns.matches(&rel_path) || DocumentKind::from_path(&rel_path).is_none() {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };

        files.push(DiscoveredFile {
            abs_path,
            rel_path,
            size: metadata.len(),
            mtime: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(files)
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
