//! Configuration file parsing.
//!
//! Parses a `.sift.toml` file into [`RawConfig`]. Every section and key is
//! optional; missing values take their documented defaults and unknown keys
//! are rejected.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ContextSettings, HighlightSettings, IndexSettings, ResultsSettings};

/// Configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// `[index]` section.
    pub index: IndexSettings,
    /// `[results]` section.
    pub results: ResultsSettings,
    /// `[highlight]` section.
    pub highlight: HighlightSettings,
    /// `[context]` section.
    pub context: ContextSettings,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}
