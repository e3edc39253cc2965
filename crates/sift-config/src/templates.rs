//! Starter configurations written by `sift init`.
//!
//! The templates under `templates/` are valid TOML holding the defaults.
//! `sift init` writes them with every setting commented out, so a fresh file
//! documents the defaults without pinning them.

/// Template for a project `.sift.toml`.
const LOCAL: &str = include_str!("../templates/config.toml");

/// Template for `~/.sift.toml`.
const GLOBAL: &str = include_str!("../templates/config-global.toml");

/// Returns the project template with settings commented out.
pub fn local_template() -> String {
    commented(LOCAL)
}

/// Returns the global template with settings commented out.
pub fn global_template() -> String {
    commented(GLOBAL)
}

/// Prefixes every setting and section line with `# `.
fn commented(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{RawConfig, parse::parse_config_str};

    #[test]
    fn local_template_holds_defaults() {
        let parsed = parse_config_str(LOCAL, Path::new("config.toml")).unwrap();
        let mut expected = RawConfig::default();
        expected.index.path = Some(".sift/index".into());
        expected.index.root = Some(".".into());
        assert_eq!(parsed, expected);
    }

    #[test]
    fn global_template_is_valid() {
        let parsed = parse_config_str(GLOBAL, Path::new("config-global.toml")).unwrap();
        assert_eq!(parsed.index.root.as_deref(), Some("~/Documents"));
    }

    #[test]
    fn written_templates_configure_nothing() {
        for template in [local_template(), global_template()] {
            let parsed = parse_config_str(&template, Path::new("x")).unwrap();
            assert_eq!(parsed, RawConfig::default());
        }
    }

    #[test]
    fn comments_and_blank_lines_kept() {
        assert_eq!(
            commented("# note\n[results]\n\npage_size = 5\n"),
            "# note\n# [results]\n\n# page_size = 5\n"
        );
    }
}
