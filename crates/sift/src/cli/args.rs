//! Clap argument definitions for the `sift` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use sift_query::PropertyFilter;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Sift - full-text search over a directory of documents")]
pub struct Cli {
    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log everything, including per-file and per-query detail
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `sift search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search keywords
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Page of results to show
    #[arg(short = 'p', long, default_value = "1")]
    pub page: usize,

    /// Results per page (0 shows all) [default: from config]
    #[arg(short = 'n', long)]
    pub per_page: Option<usize>,

    /// Restrict to documents whose property matches (NAME=VALUE, repeatable)
    #[arg(short = 'f', long = "filter", value_name = "NAME=VALUE")]
    pub filters: Vec<PropertyFilter>,

    /// Do not highlight matched terms
    #[arg(long)]
    pub no_highlight: bool,

    /// Show the start of each document instead of excerpts around matches
    #[arg(long)]
    pub no_context: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Returns the keywords as a single query string.
    pub fn keywords(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the index
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term must appear
  term1 term2       Both terms (implicit AND)
  \"phrase\"          Exact phrase match
  -term             Term must NOT appear
  NOT term          Term must NOT appear
  term1 OR term2    Either term
  (expr)            Grouping

FIELD QUERIES:
  title=term        Search in titles only
  body=term         Search in body text only
  path=file.md      Match one document path
  author=jane       Match a frontmatter or meta property

EXAMPLES:
  sift search rust async
  sift search '\"error handling\"'
  sift search 'rust -deprecated'
  sift search 'rust OR golang' --page 2
  sift search guide --filter author=jane")]
    Search(SearchCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Rebuild the search index
    Index,

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,

    /// Show configuration and index status
    Status,
}
