//! Implementation of `sift status`.

use std::{path::PathBuf, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use sift_config::{Config, ConfigError};
use sift_highlight::{dim, subheader};
use sift_index::detect_index_status;

use crate::cli::context::CommandContext;

/// Shows the configuration file, document locations and index status.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let Some(config_file) = &config.config_file else {
        println!("{}", dim("No configuration file found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
        return ExitCode::SUCCESS;
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Setting", "Value"]);
    for (name, value) in status_rows(config) {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    println!("{} {}", subheader("Config file:"), config_file.display());
    println!("{table}");
    ExitCode::SUCCESS
}

/// Collects the rows of the status table.
fn status_rows(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("Document root", display_path(&config.document_root())),
        ("Index directory", display_path(&config.index_dir())),
        ("Include", config.index.include.join(", ")),
        ("Exclude", config.index.exclude.join(", ")),
        ("Stemmer", config.index.stemmer.clone()),
        ("Index", detect_index_status(config).description()),
    ]
}

/// Displays a resolved path, or why it could not be resolved.
fn display_path(result: &Result<PathBuf, ConfigError>) -> String {
    match result {
        Ok(path) => path.display().to_string(),
        Err(e) => format!("unresolved: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_config_file() {
        let rows = status_rows(&Config::default());
        let index = rows.iter().find(|(name, _)| *name == "Index").unwrap();
        assert_eq!(index.1, "missing");
        let root = rows.iter().find(|(name, _)| *name == "Document root").unwrap();
        assert!(root.1.starts_with("unresolved"));
    }
}
