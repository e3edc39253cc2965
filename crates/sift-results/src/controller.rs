//! One search request from keywords to a page of display hits.

use std::{iter, time::Instant};

use serde::Serialize;
use sift_config::{ContextSettings, ResultsSettings};
use sift_context::ContextExtractor;
use sift_highlight::Highlight;
use sift_query::{
    PropertyFilter, QueryBuilder, QueryPolicy, StandardPolicy, Stopwords, TermSet, WordStemmer,
};
use thiserror::Error;

use crate::{
    assemble::ResultAssembler,
    hit::{DisplayHit, RawHit},
    observer::SearchObserver,
    page::{PageInfo, paginate},
};

/// Errors reported by an index while running a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// The index cannot be opened or read.
    #[error("index unavailable: {0}")]
    Unavailable(String),
    /// The query could not be built or run.
    #[error("{0}")]
    Query(String),
}

/// Errors that abort a search request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The backing index cannot be used.
    #[error("index unavailable: {message}")]
    IndexUnavailable {
        /// What went wrong.
        message: String,
    },
}

/// The hits of one executed query.
pub trait HitCursor {
    /// Total number of hits.
    fn total(&self) -> usize;

    /// Positions the cursor at a 0-based offset.
    fn seek(&mut self, offset: usize);

    /// Returns the next hit, or `None` when exhausted.
    fn next_hit(&mut self) -> Result<Option<RawHit>, ExecuteError>;
}

/// A full-text index that can run boolean queries.
pub trait IndexExecutor {
    /// Cursor over the hits of a query.
    type Hits: HitCursor;

    /// Runs a boolean query string.
    fn execute(&self, query: &str) -> Result<Self::Hits, ExecuteError>;

    /// Words the index drops from queries and documents.
    fn stop_words(&self) -> &Stopwords;

    /// The stemmer the index applies to words.
    fn stemmer(&self) -> &dyn WordStemmer;
}

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Raw keywords, possibly with quoted phrases and boolean operators.
    pub keywords: String,
    /// 1-based page number.
    pub page: usize,
    /// Page size override; `None` uses the configured size.
    pub page_size: Option<usize>,
    /// Property filters ANDed onto the keywords.
    pub filters: Vec<PropertyFilter>,
}

impl SearchRequest {
    /// Creates a request for the first page.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            page: 1,
            page_size: None,
            filters: Vec::new(),
        }
    }

    /// Selects a page.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Overrides the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Adds a property filter.
    pub fn filter(mut self, filter: PropertyFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// A rendered page of results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    /// Keywords as submitted.
    pub keywords: String,
    /// Boolean query string sent to the index.
    pub query: String,
    /// Terms and phrases used for context and highlighting.
    pub terms: TermSet,
    /// Paging metadata.
    #[serde(flatten)]
    pub page: PageInfo,
    /// Display hits of this page.
    pub hits: Vec<DisplayHit>,
    /// Message of a non-fatal query failure.
    pub error: Option<String>,
    /// Time spent on the request.
    pub elapsed_ms: u64,
}

/// Runs search requests against an index.
pub struct SearchController<'a, E: IndexExecutor> {
    /// The index to query.
    index: &'a E,
    /// Result page settings.
    results: ResultsSettings,
    /// Excerpt settings.
    context: ContextSettings,
    /// Term marker for descriptions.
    highlighter: &'a dyn Highlight,
    /// Receives non-fatal events.
    observer: &'a dyn SearchObserver,
    /// Builds the boolean query from keywords and filters.
    policy: &'a dyn QueryPolicy,
}

impl<'a, E: IndexExecutor> SearchController<'a, E> {
    /// Creates a controller using the standard query policy.
    pub fn new(
        index: &'a E,
        results: ResultsSettings,
        context: ContextSettings,
        highlighter: &'a dyn Highlight,
        observer: &'a dyn SearchObserver,
    ) -> Self {
        Self {
            index,
            results,
            context,
            highlighter,
            observer,
            policy: &StandardPolicy,
        }
    }

    /// Replaces the query policy.
    pub fn with_policy(mut self, policy: &'a dyn QueryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs one request.
    ///
    /// Only an unavailable index is an error. Query failures are reported to
    /// the observer and yield an empty page carrying the message.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let started = Instant::now();
        let page_size = request.page_size.unwrap_or(self.results.page_size);

        let terms = TermSet::extract(
            &request.keywords,
            self.index.stop_words(),
            self.index.stemmer(),
        );
        let query = QueryBuilder::new(request.keywords.as_str())
            .filters(request.filters.iter().cloned())
            .build_with(self.policy);

        let empty = |error: Option<String>| SearchPage {
            keywords: request.keywords.clone(),
            query: query.clone(),
            terms: terms.clone(),
            page: paginate(0, page_size, request.page),
            hits: Vec::new(),
            error,
            elapsed_ms: elapsed_ms(started),
        };

        if query.trim().is_empty() {
            return Ok(empty(None));
        }

        let mut cursor = match self.index.execute(&query) {
            Ok(cursor) => cursor,
            Err(ExecuteError::Unavailable(message)) => {
                return Err(SearchError::IndexUnavailable { message });
            }
            Err(ExecuteError::Query(message)) => {
                self.observer.query_failed(&query, &message);
                return Ok(empty(Some(message)));
            }
        };

        let page = paginate(cursor.total(), page_size, request.page);
        cursor.seek(page.offset());

        let context =
            ContextExtractor::new(self.context.clone()).with_stemmer(self.index.stemmer());
        let results = ResultsSettings {
            page_size,
            ..self.results.clone()
        };
        let assembler = ResultAssembler::new(results, context, self.highlighter, self.observer)
            .with_stemmer(self.index.stemmer());

        let mut failure = None;
        let hits = {
            let source = iter::from_fn(|| match cursor.next_hit() {
                Ok(hit) => hit,
                Err(e) => {
                    failure = Some(e);
                    None
                }
            });
            assembler.assemble(source, &terms)
        };

        let error = match failure {
            Some(ExecuteError::Unavailable(message)) => {
                return Err(SearchError::IndexUnavailable { message });
            }
            Some(ExecuteError::Query(message)) => {
                self.observer.query_failed(&query, &message);
                Some(message)
            }
            None => None,
        };

        let elapsed = started.elapsed();
        self.observer
            .search_completed(&query, page.total_entries, hits.len(), elapsed);

        Ok(SearchPage {
            keywords: request.keywords.clone(),
            query,
            terms,
            page,
            hits,
            error,
            elapsed_ms: elapsed_ms(started),
        })
    }
}

/// Milliseconds since `started`, saturating.
fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
