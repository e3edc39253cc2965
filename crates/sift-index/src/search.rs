//! Search over a built index.
//!
//! [`Searcher`] is the [`IndexExecutor`] behind `sift search`: it parses a
//! boolean query string, compiles it against the schema, counts the matches
//! and hands back a [`SearchHits`] cursor that loads stored documents only
//! when the result page asks for them.

use std::{collections::BTreeMap, path::Path};

use sift_config::Config;
use sift_query::{Stopwords, WordStemmer, parse};
use sift_results::{ExecuteError, HitCursor, IndexExecutor, RawHit};
use tantivy::{
    DocAddress, Index, IndexReader, ReloadPolicy, Score, Searcher as TantivySearcher,
    TantivyDocument, TantivyError,
    collector::{Count, TopDocs},
    directory::MmapDirectory,
    schema::{Field, Value},
    tokenizer::Language,
};
use tracing::debug;

use crate::{
    IndexError,
    analyzer::{IndexStemmer, SIFT_TOKENIZER, build_analyzer, resolve_language, stopwords_for},
    compile::QueryCompiler,
    schema::IndexSchema,
};

/// Highest rank a hit can get.
const MAX_RANK: f32 = 1000.0;

/// Read-only handle on an index.
pub struct Searcher {
    /// Reader over committed segments.
    reader: IndexReader,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Compiler for parsed queries.
    compiler: QueryCompiler,
    /// Stop words the index was built with.
    stop_words: Stopwords,
    /// Stemmer matching the index analyzer.
    stemmer: IndexStemmer,
}

impl Searcher {
    /// Opens an existing index for searching.
    pub fn open(
        path: &Path,
        language: Option<Language>,
        stop_words: Stopwords,
    ) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let schema = IndexSchema::new();

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: TantivyError = e.into();
            IndexError::open_index(path, &err)
        })?;
        let index = Index::open(dir).map_err(|e| IndexError::open_index(path, &e))?;

        let analyzer = build_analyzer(language, &stop_words);
        index.tokenizers().register(SIFT_TOKENIZER, analyzer.clone());

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::open_index(path, &e))?;

        Ok(Self {
            reader,
            compiler: QueryCompiler::new(schema.clone(), analyzer),
            schema,
            stop_words,
            stemmer: IndexStemmer::new(language),
        })
    }

    /// Opens the index configured in `config`.
    pub fn open_with_config(config: &Config) -> Result<Self, IndexError> {
        let path = config.index_dir()?;
        Self::open(
            &path,
            resolve_language(&config.index.stemmer),
            stopwords_for(config.index.stopwords),
        )
    }

    /// Returns the number of indexed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

impl IndexExecutor for Searcher {
    type Hits = SearchHits;

    fn execute(&self, query: &str) -> Result<SearchHits, ExecuteError> {
        let Some(expr) = parse(query).map_err(|e| ExecuteError::Query(e.to_string()))? else {
            return Ok(SearchHits::empty(self.schema.clone()));
        };

        let mut compiler = self.compiler.clone();
        let Some(compiled) = compiler
            .compile(&expr)
            .map_err(|e| ExecuteError::Query(e.to_string()))?
        else {
            debug!(query, "query has no searchable terms");
            return Ok(SearchHits::empty(self.schema.clone()));
        };

        let searcher = self.reader.searcher();
        let total = searcher.search(&*compiled, &Count).map_err(|e| unavailable(&e))?;
        if total == 0 {
            return Ok(SearchHits::empty(self.schema.clone()));
        }
        let docs = searcher
            .search(&*compiled, &TopDocs::with_limit(total))
            .map_err(|e| unavailable(&e))?;
        debug!(query, total, "query executed");

        Ok(SearchHits {
            best: docs.first().map_or(0.0, |(score, _)| *score),
            searcher: Some(searcher),
            schema: self.schema.clone(),
            docs,
            position: 0,
        })
    }

    fn stop_words(&self) -> &Stopwords {
        &self.stop_words
    }

    fn stemmer(&self) -> &dyn WordStemmer {
        &self.stemmer
    }
}

/// Maps a Tantivy failure to an unavailable index.
fn unavailable(e: &TantivyError) -> ExecuteError {
    ExecuteError::Unavailable(e.to_string())
}

/// The ranked hits of one query.
pub struct SearchHits {
    /// Searcher pinned to the segments the query ran against.
    searcher: Option<TantivySearcher>,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Scored addresses, best first.
    docs: Vec<(Score, DocAddress)>,
    /// Index of the next hit to load.
    position: usize,
    /// Score of the best hit.
    best: Score,
}

impl SearchHits {
    /// A cursor with no hits.
    fn empty(schema: IndexSchema) -> Self {
        Self {
            searcher: None,
            schema,
            docs: Vec::new(),
            position: 0,
            best: 0.0,
        }
    }

    /// Converts a stored document into a raw hit.
    fn to_hit(&self, doc: &TantivyDocument, score: Score) -> RawHit {
        let properties = text(doc, self.schema.props_json)
            .and_then(|json| serde_json::from_str::<BTreeMap<String, String>>(&json).ok())
            .unwrap_or_default();

        RawHit {
            path: text(doc, self.schema.path).unwrap_or_default(),
            title: text(doc, self.schema.title).unwrap_or_default(),
            size: doc.get_first(self.schema.size).and_then(|v| v.as_u64()),
            last_modified: doc
                .get_first(self.schema.mtime)
                .and_then(|v| v.as_datetime())
                .map(|d| d.into_timestamp_secs()),
            rank: scale_rank(score, self.best),
            record_count: self.position + 1,
            description: text(doc, self.schema.body),
            properties,
        }
    }
}

impl HitCursor for SearchHits {
    fn total(&self) -> usize {
        self.docs.len()
    }

    fn seek(&mut self, offset: usize) {
        self.position = offset.min(self.docs.len());
    }

    fn next_hit(&mut self) -> Result<Option<RawHit>, ExecuteError> {
        let (Some(searcher), Some(&(score, address))) =
            (&self.searcher, self.docs.get(self.position))
        else {
            return Ok(None);
        };
        let doc: TantivyDocument = searcher.doc(address).map_err(|e| unavailable(&e))?;
        let hit = self.to_hit(&doc, score);
        self.position += 1;
        Ok(Some(hit))
    }
}

/// Reads the first value of a text field.
fn text(doc: &TantivyDocument, field: Field) -> Option<String> {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Scales a score into `1..=1000` relative to the best score.
fn scale_rank(score: Score, best: Score) -> u32 {
    if best <= 0.0 {
        return MAX_RANK as u32;
    }
    (score / best * MAX_RANK).round().clamp(1.0, MAX_RANK) as u32
}
