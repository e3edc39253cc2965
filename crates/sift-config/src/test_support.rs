//! Temporary directory trees for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory removed on drop.
pub struct TestDir(TempDir);

impl TestDir {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and its parents.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a `.sift.toml` into directory `rel` (`""` for the root).
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        self.file(&Path::new(rel).join(CONFIG_FILENAME).to_string_lossy(), content)
    }
}
