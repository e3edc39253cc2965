//! YAML frontmatter parsing for markdown documents.
//!
//! Frontmatter is optional metadata at the start of a markdown file, delimited by `---`:
//!
//! ```markdown
//! ---
//! title: My Document
//! author: Jane Doe
//! tags: [rust, tutorial]
//! ---
//!
//! # Content starts here
//! ```
//!
//! Scalar values become document properties; sequences of scalars are joined
//! with `", "`. Nested mappings are ignored.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

/// Parses YAML frontmatter from markdown content.
///
/// Returns the properties and the content after the frontmatter. Without a
/// well-formed frontmatter block, returns no properties and the original content.
pub fn parse_frontmatter(content: &str) -> (BTreeMap<String, String>, &str) {
    let content = content.trim_start_matches('\u{feff}');
    let Some(after_opening) = content.strip_prefix("---") else {
        return (BTreeMap::new(), content);
    };
    let Some(after_opening) = after_opening
        .strip_prefix("\r\n")
        .or_else(|| after_opening.strip_prefix('\n'))
    else {
        return (BTreeMap::new(), content);
    };

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return (BTreeMap::new(), content);
    };

    let yaml = &after_opening[..closing_pos];
    let remaining = after_opening[closing_pos..]
        .strip_prefix("---")
        .unwrap_or(&after_opening[closing_pos..]);
    let remaining = remaining.trim_start_matches(['\r', '\n']);

    match serde_yaml::from_str::<Option<Mapping>>(yaml) {
        Ok(mapping) => (properties(mapping.unwrap_or_default()), remaining),
        Err(_) => (BTreeMap::new(), content),
    }
}

/// Flattens a YAML mapping into string properties.
fn properties(mapping: Mapping) -> BTreeMap<String, String> {
    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = scalar(&key)?;
            let value = match value {
                Value::Sequence(items) => {
                    let items: Vec<String> = items.iter().filter_map(scalar).collect();
                    (!items.is_empty()).then(|| items.join(", "))?
                }
                other => scalar(&other)?,
            };
            Some((key, value))
        })
        .collect()
}

/// Renders a scalar YAML value as text.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Finds the byte position of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_lists() {
        let content = "---\ntitle: Rust Errors\nauthor: Jane\nyear: 2024\ndraft: false\ntags: [rust, errors]\n---\n\n# Body";
        let (props, rest) = parse_frontmatter(content);
        assert_eq!(props["title"], "Rust Errors");
        assert_eq!(props["author"], "Jane");
        assert_eq!(props["year"], "2024");
        assert_eq!(props["draft"], "false");
        assert_eq!(props["tags"], "rust, errors");
        assert_eq!(rest, "# Body");
    }

    #[test]
    fn nested_mappings_ignored() {
        let (props, _) = parse_frontmatter("---\nmeta:\n  a: 1\nkind: note\n---\nx");
        assert_eq!(props.len(), 1);
        assert_eq!(props["kind"], "note");
    }

    #[test]
    fn no_frontmatter() {
        let (props, rest) = parse_frontmatter("# Title\n\nBody");
        assert!(props.is_empty());
        assert_eq!(rest, "# Title\n\nBody");
    }

    #[test]
    fn unclosed_frontmatter_is_content() {
        let content = "---\ntitle: x\nno closing";
        let (props, rest) = parse_frontmatter(content);
        assert!(props.is_empty());
        assert_eq!(rest, content);
    }

    #[test]
    fn malformed_yaml_is_content() {
        let content = "---\n: : [\n---\nbody";
        let (props, rest) = parse_frontmatter(content);
        assert!(props.is_empty());
        assert_eq!(rest, content);
    }

    #[test]
    fn empty_frontmatter() {
        let (props, rest) = parse_frontmatter("---\n---\nbody");
        assert!(props.is_empty());
        assert_eq!(rest, "body");
    }

    #[test]
    fn crlf_line_endings() {
        let (props, rest) = parse_frontmatter("---\r\ntitle: T\r\n---\r\nbody");
        assert_eq!(props["title"], "T");
        assert_eq!(rest, "body");
    }

    #[test]
    fn horizontal_rule_is_not_frontmatter() {
        let content = "---not yaml";
        let (props, rest) = parse_frontmatter(content);
        assert!(props.is_empty());
        assert_eq!(rest, content);
    }
}
