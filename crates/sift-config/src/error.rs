//! Configuration errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Why a configuration could not be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The configuration file.
        path: PathBuf,
        /// What the filesystem reported.
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown keys or bad values.
    #[error("invalid configuration in {path}: {source}")]
    Syntax {
        /// The configuration file.
        path: PathBuf,
        /// The TOML error, with line and column.
        source: de::Error,
    },

    /// A relative path was configured but there is no configuration file to
    /// resolve it against.
    #[error("no {filename} found (run `sift init` to create one)")]
    NoConfig {
        /// The configuration file name.
        filename: &'static str,
    },

    /// An include or exclude glob does not compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern as configured.
        pattern: String,
        /// The glob compiler's complaint.
        source: globset::Error,
    },

    /// A `~` path was configured and the home directory is unknown.
    #[error("cannot expand '~': home directory unknown")]
    NoHome,
}
