//! Implementation of `sift search`.

use std::process::ExitCode;

use sift_config::{ContextFormat, ContextSettings, ResultsSettings};
use sift_highlight::{Highlight, Highlighter, TerminalHighlighter};
use sift_results::{SearchController, SearchRequest, TracingObserver};

use crate::cli::{
    args::SearchCommand,
    context::{CommandContext, fail},
    output::{print_json, print_page},
};

/// Searches the index and prints one page of results.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let searcher = match ctx.searcher() {
        Ok(searcher) => searcher,
        Err(code) => return code,
    };

    let (results, context) = settings(ctx, cmd);
    let markup = Highlighter::new(ctx.config.highlight.clone());
    let highlighter: &dyn Highlight = if cmd.json {
        &markup
    } else {
        &TerminalHighlighter
    };

    let controller =
        SearchController::new(&searcher, results, context, highlighter, &TracingObserver);

    let mut request = SearchRequest::new(cmd.keywords()).page(cmd.page);
    if let Some(per_page) = cmd.per_page {
        request = request.page_size(per_page);
    }
    request.filters.clone_from(&cmd.filters);

    let page = match controller.search(&request) {
        Ok(page) => page,
        Err(e) => return fail(&e),
    };

    if cmd.json {
        return print_json(&page);
    }
    print_page(&page, &ctx.config.results.extra_properties);
    ExitCode::SUCCESS
}

/// Applies command-line overrides to the configured result settings.
fn settings(ctx: &CommandContext, cmd: &SearchCommand) -> (ResultsSettings, ContextSettings) {
    let mut results = ctx.config.results.clone();
    let mut context = ctx.config.context.clone();

    if cmd.no_highlight {
        results.highlight = false;
    }
    if cmd.no_context {
        results.description_context = false;
        context.enabled = false;
    }
    if !cmd.json {
        context.format = ContextFormat::Text;
    }

    (results, context)
}
