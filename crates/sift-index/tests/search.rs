//! Index a small document tree and search it through the result controller.

#![allow(clippy::tests_outside_test_module)]

use std::fs;

use sift_config::{Config, HighlightSettings, ResultsSettings};
use sift_highlight::Highlighter;
use sift_index::{IndexError, Indexer, Searcher, SilentReporter};
use sift_query::{PropertyFilter, Stopwords};
use sift_results::{
    ExecuteError, HitCursor, IndexExecutor, SearchController, SearchPage, SearchRequest,
    SilentObserver,
};
use tempfile::TempDir;

const GUIDE: &str = "---
title: Getting Started
author: Jane Doe
---
If you get stuck, please do not panic or worry.
";

const HELP: &str = r#"<html>
<head>
  <title>Help</title>
  <meta name="author" content="John Smith">
</head>
<body><p>Somebody please help me find this document.</p></body>
</html>
"#;

const NOTES: &str = "Notes\nNothing relevant here.\n";

/// A built index in a temporary document root.
struct Fixture {
    /// Keeps the directory alive.
    _temp: TempDir,
    /// Loaded configuration.
    config: Config,
    /// Searcher over the built index.
    searcher: Searcher,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join(".sift.toml"), "[results]\nextra_properties = [\"author\"]\n").unwrap();
    fs::write(root.join("guide.md"), GUIDE).unwrap();
    fs::write(root.join("help.html"), HELP).unwrap();
    fs::write(root.join("notes.txt"), NOTES).unwrap();

    let config = Config::load_from_file(&root.join(".sift.toml")).unwrap();
    let stats = Indexer::new(&config).unwrap().rebuild(&mut SilentReporter).unwrap();
    assert_eq!(stats.files_indexed, 3);

    let searcher = Searcher::open_with_config(&config).unwrap();
    Fixture {
        _temp: temp,
        config,
        searcher,
    }
}

fn search(fixture: &Fixture, request: &SearchRequest) -> SearchPage {
    let hl = Highlighter::new(HighlightSettings::default());
    SearchController::new(
        &fixture.searcher,
        fixture.config.results.clone(),
        fixture.config.context.clone(),
        &hl,
        &SilentObserver,
    )
    .search(request)
    .unwrap()
}

fn paths(page: &SearchPage) -> Vec<&str> {
    page.hits.iter().map(|h| h.path.as_str()).collect()
}

#[test]
fn indexes_all_formats() {
    let f = fixture();
    assert_eq!(f.searcher.num_docs(), 3);
}

#[test]
fn keyword_search_highlights() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("please"));
    assert_eq!(page.page.total_entries, 2);
    let mut found = paths(&page);
    found.sort_unstable();
    assert_eq!(found, ["guide.md", "help.html"]);
    for hit in &page.hits {
        assert!(hit.description.contains("<strong>please</strong>"));
    }
    assert_eq!(page.hits[0].rank, 1000);
    assert_eq!(page.hits[0].record_count, 1);
    assert_eq!(page.hits[1].record_count, 2);
}

#[test]
fn stemmed_matches() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("documents"));
    assert_eq!(paths(&page), ["help.html"]);
    assert!(page.hits[0].description.contains("<strong>document</strong>"));

    let page = search(&f, &SearchRequest::new("worried"));
    assert_eq!(paths(&page), ["guide.md"]);
    let description = &page.hits[0].description;
    assert!(description.contains("<strong>worry</strong>"), "{description}");
}

#[test]
fn titles_are_searchable() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("started"));
    assert_eq!(paths(&page), ["guide.md"]);
    assert_eq!(page.hits[0].title, "Getting Started");
}

#[test]
fn phrase_and_negation() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("\"please help\""));
    assert_eq!(paths(&page), ["help.html"]);

    let page = search(&f, &SearchRequest::new("please -panic"));
    assert_eq!(paths(&page), ["help.html"]);
}

#[test]
fn property_filters() {
    let f = fixture();
    let request = SearchRequest::new("please").filter(PropertyFilter::new("author", "jane"));
    let page = search(&f, &request);
    assert_eq!(paths(&page), ["guide.md"]);
    assert_eq!(page.hits[0].extra("author"), Some("Jane Doe"));

    let page = search(&f, &SearchRequest::new("author=smith"));
    assert_eq!(paths(&page), ["help.html"]);
    assert_eq!(page.hits[0].extra("author"), Some("John Smith"));
}

#[test]
fn path_field() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("path=notes.txt"));
    assert_eq!(paths(&page), ["notes.txt"]);
    assert_eq!(page.hits[0].title, "Notes");
    assert_eq!(page.hits[0].extra("author"), None);
}

#[test]
fn paging_through_hits() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("please").page(2).page_size(1));
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].record_count, 2);
    assert_eq!(page.page.start_num, 2);
    assert_eq!(page.page.prev_page, 1);
    assert_eq!(page.page.next_page, 0);
    assert!(page.page.last_page);
}

#[test]
fn stop_words_only_finds_nothing() {
    let f = fixture();
    let page = search(&f, &SearchRequest::new("the"));
    assert!(page.hits.is_empty());
    assert!(page.error.is_none());
}

#[test]
fn malformed_query_reports_error() {
    let f = fixture();
    assert!(matches!(
        f.searcher.execute("\"please help"),
        Err(ExecuteError::Query(_))
    ));
    let page = search(&f, &SearchRequest::new("\"please help"));
    assert!(page.hits.is_empty());
    assert!(page.error.is_some());
}

#[test]
fn cursor_loads_lazily_after_seek() {
    let f = fixture();
    let mut hits = f.searcher.execute("please").unwrap();
    assert_eq!(hits.total(), 2);
    hits.seek(1);
    let hit = hits.next_hit().unwrap().unwrap();
    assert_eq!(hit.record_count, 2);
    assert!(hit.size.is_some());
    assert!(hit.last_modified.is_some());
    assert_eq!(hits.next_hit().unwrap(), None);
}

#[test]
fn missing_index_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nothing-here");
    let err = Searcher::open(&missing, None, Stopwords::basic()).err().unwrap();
    assert!(matches!(err, IndexError::OpenIndex { .. }));

    fs::create_dir(&missing).unwrap();
    let err = Searcher::open(&missing, None, Stopwords::basic()).err().unwrap();
    assert!(matches!(err, IndexError::OpenIndex { .. }));
}

#[test]
fn results_settings_apply() {
    let f = fixture();
    let results = ResultsSettings {
        highlight: false,
        description_length: 10,
        ..f.config.results.clone()
    };
    let hl = Highlighter::new(HighlightSettings::default());
    let page = SearchController::new(
        &f.searcher,
        results,
        f.config.context.clone(),
        &hl,
        &SilentObserver,
    )
    .search(&SearchRequest::new("please"))
    .unwrap();
    for hit in &page.hits {
        assert!(!hit.description.contains("<strong>"));
        assert!(hit.description.chars().count() <= 10);
    }
}
