//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs, path::Path};

use globset::{Glob, GlobMatcher};

use crate::{Config, STEMMER_LANGUAGES};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No configuration file was found.
    NoConfigFile,
    /// The document root does not exist.
    RootMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The document root exists but is not a directory.
    RootNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// An include pattern doesn't match any files.
    IncludePatternMatchesNothing {
        /// Pattern that matched nothing.
        pattern: String,
    },
    /// The stemmer language is not supported.
    UnknownStemmer {
        /// Configured language.
        name: String,
    },
    /// The highlight tag is empty.
    EmptyHighlightTag,
    /// Highlight colors are configured but a class overrides them.
    ColorsIgnored,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConfigFile => write!(f, "no configuration file found"),
            Self::RootMissing { path } => write!(f, "document root does not exist: {path}"),
            Self::RootNotDirectory { path } => {
                write!(f, "document root is not a directory: {path}")
            }
            Self::IncludePatternMatchesNothing { pattern } => {
                write!(f, "include pattern '{pattern}' matches no files")
            }
            Self::UnknownStemmer { name } => {
                write!(f, "unknown stemmer '{name}', stemming disabled")
            }
            Self::EmptyHighlightTag => write!(f, "highlight tag is empty, highlighting disabled"),
            Self::ColorsIgnored => {
                write!(f, "highlight colors are ignored because a class is set")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.config_file.is_none() {
        warnings.push(ConfigWarning::NoConfigFile);
    }

    if let Ok(root) = config.document_root() {
        warnings.extend(validate_root(config, &root));
    }

    let stemmer = config.index.stemmer.to_ascii_lowercase();
    if stemmer != "none" && !STEMMER_LANGUAGES.contains(&stemmer.as_str()) {
        warnings.push(ConfigWarning::UnknownStemmer {
            name: config.index.stemmer.clone(),
        });
    }

    if config.highlight.tag.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyHighlightTag);
    }

    if !config.highlight.class.is_empty() && !config.highlight.colors.is_empty() {
        warnings.push(ConfigWarning::ColorsIgnored);
    }

    warnings
}

/// Validates the document root and its include patterns.
fn validate_root(config: &Config, root: &Path) -> Vec<ConfigWarning> {
    let path = root.display().to_string();

    if !root.exists() {
        return vec![ConfigWarning::RootMissing { path }];
    }
    if !root.is_dir() {
        return vec![ConfigWarning::RootNotDirectory { path }];
    }

    config
        .index
        .include
        .iter()
        .filter(|pattern| !pattern_matches_any_file(root, pattern))
        .map(|pattern| ConfigWarning::IncludePatternMatchesNothing {
            pattern: pattern.clone(),
        })
        .collect()
}

/// Checks if a glob pattern matches any file below `root`.
fn pattern_matches_any_file(root: &Path, pattern: &str) -> bool {
    let Ok(glob) = Glob::new(pattern) else {
        return false;
    };
    walk_and_match(root, root, &glob.compile_matcher())
}

/// Recursively walks a directory and checks if any file matches the pattern.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobMatcher) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if walk_and_match(root, &path, matcher) {
                return true;
            }
        } else if let Ok(relative) = path.strip_prefix(root)
            && matcher.is_match(relative)
        {
            return true;
        }
    }

    false
}
