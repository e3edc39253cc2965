//! Integration tests for sift-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve.

#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use sift_config::{CONFIG_FILENAME, Config, ConfigError, ContextFormat, is_global_config};

/// Writes `content` to `rel` below `root`, creating parent directories.
fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
}

/// Writes a `.sift.toml` at the root of a fresh temporary directory.
fn project(config: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CONFIG_FILENAME, config);
    dir
}

#[test]
fn load_without_config_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path()).unwrap();

    // A global config may exist on the machine running the tests
    if let Some(file) = &config.config_file {
        assert!(is_global_config(file));
        return;
    }
    assert_eq!(config.results.page_size, 10);
    assert_eq!(config.highlight.tag, "strong");
    assert!(config.index_dir().is_err());
}

#[test]
fn load_from_subdirectory() {
    let dir = project(
        "[index]\nroot = \"docs\"\n\n[results]\npage_size = 3\n\n[context]\nformat = \"html\"\n",
    );
    let guides = dir.path().join("docs/guides");
    fs::create_dir_all(&guides).unwrap();

    let config = Config::load(&guides).unwrap();

    assert_eq!(config.config_file, Some(dir.path().join(CONFIG_FILENAME)));
    assert_eq!(config.results.page_size, 3);
    assert_eq!(config.context.format, ContextFormat::Html);
    assert_eq!(config.document_root().unwrap(), dir.path().join("docs"));
    assert_eq!(
        config.index_dir().unwrap(),
        dir.path().join(".sift").join("index")
    );
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = project("[results\npage_size = 3\n");

    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Syntax { .. }));
}

#[test]
fn unknown_keys_are_errors() {
    let dir = project("[highlight]\ncolour = \"red\"\n");

    let err = Config::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn single_string_lists() {
    let dir = project("[index]\ninclude = \"**/*.md\"\n[results]\nextra_properties = \"author\"\n");

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.index.include, vec!["**/*.md"]);
    assert_eq!(config.results.extra_properties, vec!["author"]);
}

#[test]
fn compiled_patterns_follow_config() {
    let dir = project("[index]\ninclude = [\"**/*.md\"]\nexclude = [\"private/**\"]\n");

    let config = Config::load(dir.path()).unwrap();
    let patterns = config.compile_patterns().unwrap();
    assert!(patterns.matches(Path::new("notes/a.md")));
    assert!(!patterns.matches(Path::new("private/a.md")));
    assert!(!patterns.matches(Path::new("notes/a.txt")));
}

#[test]
fn validate_reports_missing_root() {
    let dir = project("[index]\nroot = \"missing\"\n");

    let config = Config::load(dir.path()).unwrap();
    let warnings = config.validate();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].to_string().contains("does not exist"));
}

#[test]
fn validate_clean_project() {
    let dir = project("[index]\nroot = \"docs\"\ninclude = [\"**/*.md\"]\n");
    write(dir.path(), "docs/guide.md", "# Guide");

    let config = Config::load(dir.path()).unwrap();
    assert!(config.validate().is_empty());
}
