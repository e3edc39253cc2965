//! Per-invocation state shared by the commands.

use std::{env, fmt::Display, path::PathBuf, process::ExitCode};

use sift_config::Config;
use sift_index::{IndexError, Searcher};

/// Prints `error: {message}` and returns the failure exit code.
pub fn fail(message: &dyn Display) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

/// The working directory and the configuration that applies to it.
pub struct CommandContext {
    /// Working directory.
    pub cwd: PathBuf,
    /// The applicable configuration; defaults when no file was found.
    pub config: Config,
}

impl CommandContext {
    /// Reads the working directory and loads its configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let mut ctx = Self::load_cwd_only()?;
        ctx.config = Config::load(&ctx.cwd)
            .map_err(|e| fail(&format_args!("failed to load configuration: {e}")))?;
        Ok(ctx)
    }

    /// Reads the working directory only, with a default configuration.
    ///
    /// `init` uses this so that it can replace a broken configuration file.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = env::current_dir()
            .map_err(|e| fail(&format_args!("could not determine current directory: {e}")))?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Fails with an init hint unless a configuration file was found.
    pub fn require_config(&self) -> Result<(), ExitCode> {
        if self.config.config_file.is_some() {
            return Ok(());
        }
        let code = fail(&"no configuration file found");
        eprintln!("Run 'sift init' to create a configuration file.");
        Err(code)
    }

    /// Opens the configured index, with an indexing hint if it does not exist yet.
    pub fn searcher(&self) -> Result<Searcher, ExitCode> {
        Searcher::open_with_config(&self.config).map_err(|e| {
            let code = fail(&e);
            if let IndexError::OpenIndex { .. } = e {
                eprintln!("Run 'sift index' to build the index.");
            }
            code
        })
    }
}
