//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod index;
pub mod init;
pub mod search;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: &Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, cmd),
        Commands::Init(cmd) => init::run(ctx, cmd),
        Commands::Index => index::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
