//! Reporting of non-fatal search events.

use std::time::Duration;

use sift_highlight::HighlightUnavailable;
use tracing::{debug, warn};

/// Receives events that do not abort a search request.
pub trait SearchObserver {
    /// The index rejected or failed to run the query.
    fn query_failed(&self, query: &str, message: &str);

    /// Highlighting failed for one hit; the plain description is used instead.
    fn highlight_unavailable(&self, path: &str, error: &HighlightUnavailable);

    /// A request finished.
    fn search_completed(&self, _query: &str, _total: usize, _shown: usize, _elapsed: Duration) {}
}

/// Emits observer events as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn query_failed(&self, query: &str, message: &str) {
        warn!(query, message, "query failed");
    }

    fn highlight_unavailable(&self, path: &str, error: &HighlightUnavailable) {
        warn!(path, reason = %error.reason, "highlighting unavailable, using plain text");
    }

    fn search_completed(&self, query: &str, total: usize, shown: usize, elapsed: Duration) {
        debug!(
            query,
            total,
            shown,
            elapsed_ms = elapsed.as_millis(),
            "search completed"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl SearchObserver for SilentObserver {
    fn query_failed(&self, _query: &str, _message: &str) {}

    fn highlight_unavailable(&self, _path: &str, _error: &HighlightUnavailable) {}
}
