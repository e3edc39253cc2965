//! Configuration system for sift.
//!
//! sift uses a TOML configuration file named `.sift.toml`. The file closest to
//! the working directory applies; `~/.sift.toml` is the fallback. Every key has
//! a default, so an empty file (or no file at all) is a valid configuration.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_file, global_config_path, is_global_config};
pub use error::ConfigError;
pub use parse::{RawConfig, parse_config_file, parse_config_str};
pub use patterns::CompiledPatterns;
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, formats::PreferMany, serde_as};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Stemming languages understood by the index.
pub const STEMMER_LANGUAGES: &[&str] = &[
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "tamil",
    "turkish",
];

/// Index directory used when `[index] path` is not set, relative to the config file.
pub const DEFAULT_INDEX_DIR: &str = ".sift/index";

/// Fully loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index location and document selection.
    pub index: IndexSettings,
    /// Result presentation.
    pub results: ResultsSettings,
    /// Highlight markup.
    pub highlight: HighlightSettings,
    /// Context excerpt extraction.
    pub context: ContextSettings,
    /// The file this configuration was loaded from, if any.
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration that applies to `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration file is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        match discover_config_file(cwd) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        Ok(Self::from_raw(raw, Some(path.to_path_buf())))
    }

    /// Builds a configuration from parsed sections.
    pub fn from_raw(raw: RawConfig, config_file: Option<PathBuf>) -> Self {
        Self {
            index: raw.index,
            results: raw.results,
            highlight: raw.highlight,
            context: raw.context,
            config_file,
        }
    }

    /// Returns the directory containing the configuration file.
    pub fn config_root(&self) -> Option<&Path> {
        self.config_file.as_deref().and_then(Path::parent)
    }

    /// Returns the resolved index directory.
    ///
    /// Absolute and `~` paths resolve without a configuration file; anything
    /// else is relative to the configuration file's directory.
    pub fn index_dir(&self) -> Result<PathBuf, ConfigError> {
        let path = self.index.path.as_deref().unwrap_or(DEFAULT_INDEX_DIR);
        self.resolve(path)
    }

    /// Returns the resolved document root (the config directory by default).
    pub fn document_root(&self) -> Result<PathBuf, ConfigError> {
        let root = self.index.root.as_deref().unwrap_or(".");
        self.resolve(root)
    }

    /// Resolves a configured path against the config directory.
    fn resolve(&self, path: &str) -> Result<PathBuf, ConfigError> {
        let is_absolute = path.starts_with('~') || Path::new(path).is_absolute();
        match self.config_root() {
            Some(root) => resolve_path(path, root),
            None if is_absolute => resolve_path(path, Path::new("/")),
            None => Err(ConfigError::NoConfig {
                filename: CONFIG_FILENAME,
            }),
        }
    }

    /// Compiles the include/exclude patterns of the `[index]` section.
    pub fn compile_patterns(&self) -> Result<CompiledPatterns, ConfigError> {
        CompiledPatterns::compile(&self.index)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A missing configuration file
    /// - A document root that doesn't exist or isn't a directory
    /// - Include patterns that don't match any files
    /// - Unknown stemmer languages
    /// - Highlight settings that cannot take effect
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.sift.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let raw = RawConfig {
            index: self.index.clone(),
            results: self.results.clone(),
            highlight: self.highlight.clone(),
            context: self.context.clone(),
        };
        toml::to_string_pretty(&raw).expect("settings serialization should not fail")
    }
}

/// Which stop-word list the index and term extraction use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordList {
    /// A short list of English articles, conjunctions and prepositions.
    #[default]
    Basic,
    /// The full Stopwords ISO English list.
    Extended,
    /// No stop words.
    None,
}

/// `[index]` settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexSettings {
    /// Index directory (default `.sift/index` next to the config file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Document directory (default: the config file's directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Glob patterns of files to index. Accepts a string or an array.
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub include: Vec<String>,
    /// Glob patterns of files to skip. Accepts a string or an array.
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub exclude: Vec<String>,
    /// Stemming language, or `none`.
    pub stemmer: String,
    /// Stop-word list.
    pub stopwords: StopwordList,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            path: None,
            root: None,
            include: ["**/*.md", "**/*.txt", "**/*.html", "**/*.htm"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude: Vec::new(),
            stemmer: String::from("english"),
            stopwords: StopwordList::Basic,
        }
    }
}

/// `[results]` settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResultsSettings {
    /// Hits per page (0 = all hits on one page).
    pub page_size: usize,
    /// Wrap matched terms in the description with highlight markup.
    pub highlight: bool,
    /// Replace the description with excerpts around matched terms.
    pub description_context: bool,
    /// Maximum description length in characters (0 = unlimited).
    pub description_length: usize,
    /// Document properties copied into each result, in this order.
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub extra_properties: Vec<String>,
}

impl Default for ResultsSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            highlight: true,
            description_context: true,
            description_length: 250,
            extra_properties: Vec::new(),
        }
    }
}

/// `[highlight]` settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightSettings {
    /// Element name wrapped around matches.
    pub tag: String,
    /// CSS class for the element; takes precedence over `colors`.
    pub class: String,
    /// Background colors assigned to distinct terms in rotation.
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub colors: Vec<String>,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            tag: String::from("strong"),
            class: String::new(),
            colors: Vec::new(),
        }
    }
}

/// How context excerpts are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextFormat {
    /// Excerpts are verbatim slices of the text.
    #[default]
    Text,
    /// Excerpts are HTML-escaped.
    Html,
}

/// `[context]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextSettings {
    /// Whether excerpt extraction runs at all.
    pub enabled: bool,
    /// Words kept before each match.
    pub words_before: usize,
    /// Words kept after each match.
    pub words_after: usize,
    /// Maximum number of excerpts per description.
    pub max_excerpts: usize,
    /// Marker placed where text was omitted.
    pub ellipsis: String,
    /// Output format.
    pub format: ContextFormat,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            words_before: 10,
            words_after: 10,
            max_excerpts: 3,
            ellipsis: String::from("..."),
            format: ContextFormat::Text,
        }
    }
}
