//! Implementation of `sift index`.

use std::{path::Path, process::ExitCode};

use sift_highlight::{dim, success, warning};
use sift_index::{IndexStats, Indexer, ProgressReporter};
use tracing::debug;

use crate::cli::context::{CommandContext, fail};

/// Reports indexing progress on the terminal.
struct TerminalReporter;

impl ProgressReporter for TerminalReporter {
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize) {
        debug!(path = %path.display(), current, total, "indexing");
    }

    fn on_file_done(&mut self, _path: &Path) {}

    fn on_file_error(&mut self, path: &Path, error: &str) {
        eprintln!("{} {}: {error}", warning("skipped"), path.display());
    }

    fn on_complete(&mut self, stats: &IndexStats) {
        let files = if stats.files_indexed == 1 { "file" } else { "files" };
        println!(
            "{}",
            success(&format!("Indexed {} {files}", stats.files_indexed))
        );
        if stats.files_skipped > 0 {
            println!("{}", dim(&format!("{} skipped", stats.files_skipped)));
        }
    }
}

/// Rebuilds the search index from the document root.
pub fn run(ctx: &CommandContext) -> ExitCode {
    if let Err(code) = ctx.require_config() {
        return code;
    }

    let indexer = match Indexer::new(&ctx.config) {
        Ok(indexer) => indexer,
        Err(e) => return fail(&format_args!("failed to initialize indexer: {e}")),
    };

    println!(
        "Indexing {} {}",
        indexer.document_root().display(),
        dim(&format!("-> {}", indexer.index_dir().display()))
    );

    match indexer.rebuild(&mut TerminalReporter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(&format_args!("indexing failed: {e}")),
    }
}
