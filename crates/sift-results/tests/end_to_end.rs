//! End-to-end searches against a small in-memory index.

#![allow(clippy::tests_outside_test_module)]

use sift_config::{ContextSettings, HighlightSettings, ResultsSettings};
use sift_highlight::Highlighter;
use sift_query::{NoStemmer, QueryExpr, Stopwords, WordStemmer, parse};
use sift_results::{
    ExecuteError, HitCursor, IndexExecutor, RawHit, SearchController, SearchPage, SearchRequest,
    SilentObserver,
};

/// Documents held in memory, matched word by word.
struct MemoryIndex {
    /// Indexed documents.
    docs: Vec<RawHit>,
    /// Stop words.
    stop: Stopwords,
}

/// Matching documents of one query.
struct MemoryHits {
    /// Hits in result order.
    hits: Vec<RawHit>,
    /// Next position.
    pos: usize,
}

impl HitCursor for MemoryHits {
    fn total(&self) -> usize {
        self.hits.len()
    }

    fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    fn next_hit(&mut self) -> Result<Option<RawHit>, ExecuteError> {
        let hit = self.hits.get(self.pos).cloned();
        self.pos += 1;
        Ok(hit)
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches(expr: &QueryExpr, doc: &RawHit) -> bool {
    let body = words(doc.description.as_deref().unwrap_or_default());
    match expr {
        QueryExpr::Term(t) => body.contains(&t.to_lowercase()),
        QueryExpr::Phrase(p) => {
            let p: Vec<String> = p.iter().map(|w| w.to_lowercase()).collect();
            body.windows(p.len()).any(|w| w == p.as_slice())
        }
        QueryExpr::Not(inner) => !matches(inner, doc),
        QueryExpr::And(all) => all.iter().all(|e| matches(e, doc)),
        QueryExpr::Or(any) => any.iter().any(|e| matches(e, doc)),
        QueryExpr::Field { name, expr } => doc.properties.get(name).is_some_and(|value| {
            let value = words(value);
            match expr.as_ref() {
                QueryExpr::Term(t) => value.contains(&t.to_lowercase()),
                _ => false,
            }
        }),
    }
}

impl IndexExecutor for MemoryIndex {
    type Hits = MemoryHits;

    fn execute(&self, query: &str) -> Result<MemoryHits, ExecuteError> {
        let expr = parse(query).map_err(|e| ExecuteError::Query(e.to_string()))?;
        let hits = match expr {
            Some(expr) => self
                .docs
                .iter()
                .filter(|d| matches(&expr, d))
                .enumerate()
                .map(|(i, d)| RawHit {
                    record_count: i + 1,
                    rank: 1000,
                    ..d.clone()
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(MemoryHits { hits, pos: 0 })
    }

    fn stop_words(&self) -> &Stopwords {
        &self.stop
    }

    fn stemmer(&self) -> &dyn WordStemmer {
        &NoStemmer
    }
}

const DOC_A: &str = "If you get stuck, please do not panic or worry.";
const DOC_B: &str = "Somebody please help me find this document.";

fn corpus() -> MemoryIndex {
    let doc = |path: &str, text: &str| RawHit {
        path: path.to_string(),
        title: path.to_string(),
        size: Some(text.len() as u64),
        last_modified: Some(1_700_000_000),
        description: Some(text.to_string()),
        ..RawHit::default()
    };
    MemoryIndex {
        docs: vec![doc("a.txt", DOC_A), doc("b.txt", DOC_B)],
        stop: Stopwords::basic(),
    }
}

fn search(highlight: bool, keywords: &str) -> SearchPage {
    let index = corpus();
    let hl = Highlighter::new(HighlightSettings::default());
    let results = ResultsSettings {
        page_size: 10,
        highlight,
        ..ResultsSettings::default()
    };
    SearchController::new(
        &index,
        results,
        ContextSettings::default(),
        &hl,
        &SilentObserver,
    )
    .search(&SearchRequest::new(keywords))
    .unwrap()
}

#[test]
fn plain_results() {
    let page = search(false, "please");
    assert_eq!(page.page.total_entries, 2);
    assert_eq!(page.hits.len(), 2);
    assert!(page.page.pages.is_empty());
    assert!(page.hits[0].description.contains(DOC_A));
    assert!(page.hits[1].description.contains(DOC_B));
    assert_eq!(page.hits[0].date, "November 14, 2023");
    assert!(page.error.is_none());
}

#[test]
fn highlighted_results() {
    let page = search(true, "please");
    assert_eq!(page.hits.len(), 2);
    for hit in &page.hits {
        assert_eq!(hit.description.matches("<strong>please</strong>").count(), 1);
        assert_eq!(hit.description.matches("<strong>").count(), 1);
    }
}

#[test]
fn operators_never_highlighted() {
    let page = search(true, "please or panic");
    assert_eq!(page.hits.len(), 2);
    let a = &page.hits[0].description;
    assert!(a.contains("<strong>please</strong> do not <strong>panic</strong> or worry"));
    assert!(!a.contains("<strong>or</strong>"));
}

#[test]
fn phrase_search() {
    let page = search(true, "\"please help\"");
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].path, "b.txt");
    assert!(page.hits[0].description.contains("<strong>please help</strong>"));
    assert_eq!(page.terms.phrases(), ["please help".to_string()]);
}

#[test]
fn negation_excludes() {
    let page = search(false, "please -panic");
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].path, "b.txt");
}

#[test]
fn malformed_query_is_not_fatal() {
    let page = search(true, "\"please help");
    assert!(page.hits.is_empty());
    assert_eq!(page.page.total_entries, 0);
    assert!(page.error.is_some_and(|e| e.contains("unclosed quote")));
}

#[test]
fn json_shape() {
    let json = serde_json::to_value(search(true, "please")).unwrap();
    for key in [
        "total_entries",
        "start_num",
        "stop_num",
        "next_page",
        "prev_page",
        "first_page",
        "last_page",
        "pages",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["hits"][0]["path"], "a.txt");
    assert_eq!(json["terms"]["terms"][0], "please");
}
