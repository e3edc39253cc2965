//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::ConfigWarning;
use sift_highlight::{dim, subheader, success, warning};
use sift_index::detect_index_status;

use crate::cli::context::CommandContext;

/// Validates the configuration and reports issues.
///
/// Exits non-zero when there are warnings or the index is not searchable.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("Checking configuration...");
    println!();

    match &config.config_file {
        Some(path) => println!("{} {}", subheader("Config file:"), path.display()),
        None => println!("{} {}", subheader("Config file:"), dim("(none)")),
    }

    let index_status = detect_index_status(config);
    println!("{} {}", subheader("Index:"), index_status.description());
    println!();

    let warnings = config.validate();
    if warnings.is_empty() && index_status.is_ready() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
    }

    print_hints(&warnings, index_status.is_ready());
    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning], index_ready: bool) {
    let mut hints = Vec::new();

    for w in warnings {
        let hint = match w {
            ConfigWarning::NoConfigFile => "Run 'sift init' to create a configuration file.",
            ConfigWarning::RootMissing { .. } | ConfigWarning::RootNotDirectory { .. } => {
                "Point [index] root at the directory holding your documents."
            }
            ConfigWarning::IncludePatternMatchesNothing { .. } => {
                "Check the [index] include patterns against the document root."
            }
            ConfigWarning::UnknownStemmer { .. } => {
                "Set [index] stemmer to a supported language or \"none\"."
            }
            ConfigWarning::EmptyHighlightTag | ConfigWarning::ColorsIgnored => {
                "Review the [highlight] section."
            }
        };
        hints.push(hint);
    }
    if !index_ready {
        hints.push("Run 'sift index' to build the index.");
    }

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("{}", subheader("Hints:"));
        for hint in hints {
            println!("   {}", dim(hint));
        }
    }
}
