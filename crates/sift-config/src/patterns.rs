//! Include/exclude pattern compilation and matching.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, IndexSettings};

/// Compiled glob patterns deciding which documents get indexed.
#[derive(Debug)]
pub struct CompiledPatterns {
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
}

impl CompiledPatterns {
    /// Compiles the include/exclude patterns of an `[index]` section.
    pub fn compile(settings: &IndexSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(&settings.include, "include")?,
            exclude: build_set(&settings.exclude, "exclude")?,
        })
    }

    /// Checks if a path (relative to the document root) should be indexed.
    ///
    /// A file matches if it matches at least one include pattern and no
    /// exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Compiles a list of patterns into one set.
fn build_set(patterns: &[String], kind: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ConfigError::Pattern {
        pattern: format!("<combined {kind} patterns>"),
        source: e,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(include: &[&str], exclude: &[&str]) -> IndexSettings {
        IndexSettings {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            ..IndexSettings::default()
        }
    }

    #[test]
    fn default_patterns_cover_document_types() {
        let patterns = CompiledPatterns::compile(&IndexSettings::default()).unwrap();
        assert!(patterns.matches(Path::new("guide.md")));
        assert!(patterns.matches(Path::new("a/b/notes.txt")));
        assert!(patterns.matches(Path::new("site/index.html")));
        assert!(!patterns.matches(Path::new("image.png")));
    }

    #[test]
    fn exclude_wins() {
        let patterns = CompiledPatterns::compile(&settings(&["**/*.md"], &["drafts/**"])).unwrap();
        assert!(patterns.matches(Path::new("docs/a.md")));
        assert!(!patterns.matches(Path::new("drafts/a.md")));
    }

    #[test]
    fn no_include_matches_nothing() {
        let patterns = CompiledPatterns::compile(&settings(&[], &[])).unwrap();
        assert!(!patterns.matches(Path::new("a.md")));
    }

    #[test]
    fn invalid_pattern_reported() {
        let err = CompiledPatterns::compile(&settings(&["a[b"], &[])).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { ref pattern, .. } if pattern == "a[b"));
    }
}
