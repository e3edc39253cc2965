//! Stages source documents into the Tantivy index.

use std::{collections::BTreeMap, fs, path::Path};

use sift_query::Stopwords;
use tantivy::{
    DateTime, Index, IndexWriter as TantivyIndexWriter, TantivyDocument, TantivyError,
    directory::MmapDirectory,
    tokenizer::{Language, TextAnalyzer},
};

use crate::{
    analyzer::{SIFT_TOKENIZER, analyze, build_analyzer},
    document::SourceDocument,
    error::IndexError,
    schema::{IndexSchema, property_term},
};

/// Memory budget shared by Tantivy's indexing threads.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Adds documents to an index directory, creating the index if needed.
pub struct IndexWriter {
    /// The open index.
    index: Index,
    /// Tantivy's writer; holds the directory lock.
    writer: TantivyIndexWriter,
    /// Field handles.
    schema: IndexSchema,
    /// The analyzer registered as [`SIFT_TOKENIZER`], reused for property terms.
    analyzer: TextAnalyzer,
}

impl IndexWriter {
    /// Opens the index at `path`, creating the directory and index if absent.
    pub fn open(
        path: &Path,
        language: Option<Language>,
        stop_words: &Stopwords,
    ) -> Result<Self, IndexError> {
        fs::create_dir_all(path)?;
        let schema = IndexSchema::new();

        let directory = MmapDirectory::open(path)
            .map_err(|e| IndexError::open_index(path, &TantivyError::from(e)))?;
        let index = Index::open_or_create(directory, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path, &e))?;

        let analyzer = build_analyzer(language, stop_words);
        index.tokenizers().register(SIFT_TOKENIZER, analyzer.clone());

        let writer = index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| IndexError::open_index(path, &e))?;

        Ok(Self {
            index,
            writer,
            schema,
            analyzer,
        })
    }

    /// Stages `doc`. Nothing is visible to searchers before [`commit`](Self::commit).
    pub fn add_document(&mut self, doc: &SourceDocument) -> Result<(), IndexError> {
        let fields = &self.schema;
        let mut entry = TantivyDocument::new();
        entry.add_text(fields.path, &doc.path);
        entry.add_text(fields.title, &doc.title);
        entry.add_text(fields.body, &doc.body);
        entry.add_u64(fields.size, doc.size);
        entry.add_date(fields.mtime, DateTime::from_timestamp_secs(doc.mtime_secs()));

        // One exact term per analyzed token, so `author=smith` matches "John Smith"
        for (name, value) in &doc.properties {
            for token in analyze(&mut self.analyzer, value) {
                entry.add_text(fields.props, property_term(name, &token));
            }
        }
        entry.add_text(fields.props_json, properties_json(&doc.properties));

        self.writer
            .add_document(entry)
            .map_err(IndexError::during("add document"))?;
        Ok(())
    }

    /// Stages removal of every document.
    pub fn delete_all(&mut self) -> Result<(), IndexError> {
        self.writer
            .delete_all_documents()
            .map_err(IndexError::during("clear"))?;
        Ok(())
    }

    /// Makes staged changes durable and visible.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(IndexError::during("commit"))?;
        Ok(())
    }

    /// Counts committed documents.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(IndexError::during("read"))?;
        Ok(reader.searcher().num_docs())
    }
}

/// Encodes properties for the stored `props_json` field.
fn properties_json(properties: &BTreeMap<String, String>) -> String {
    serde_json::to_string(properties).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod test {
    use std::time::UNIX_EPOCH;

    use tempfile::TempDir;

    use super::*;

    fn doc(path: &str, body: &str) -> SourceDocument {
        SourceDocument {
            path: path.to_string(),
            title: path.to_string(),
            body: body.to_string(),
            size: body.len() as u64,
            mtime: UNIX_EPOCH,
            properties: BTreeMap::from([("author".to_string(), "Jane Doe".to_string())]),
        }
    }

    fn open(dir: &Path) -> IndexWriter {
        IndexWriter::open(dir, Some(Language::English), &Stopwords::basic()).unwrap()
    }

    #[test]
    fn creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested/index");
        drop(open(&dir));
        assert!(dir.join("meta.json").exists());
    }

    #[test]
    fn commit_makes_documents_countable() {
        let temp = TempDir::new().unwrap();
        let mut writer = open(temp.path());
        writer.add_document(&doc("a.md", "First")).unwrap();
        writer.add_document(&doc("b.md", "Second")).unwrap();
        assert_eq!(writer.num_docs().unwrap(), 0);
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 2);
    }

    #[test]
    fn reopen_keeps_documents() {
        let temp = TempDir::new().unwrap();
        {
            let mut writer = open(temp.path());
            writer.add_document(&doc("a.md", "First")).unwrap();
            writer.commit().unwrap();
        }
        assert_eq!(open(temp.path()).num_docs().unwrap(), 1);
    }

    #[test]
    fn delete_all_then_commit_empties() {
        let temp = TempDir::new().unwrap();
        let mut writer = open(temp.path());
        writer.add_document(&doc("a.md", "First")).unwrap();
        writer.commit().unwrap();
        writer.delete_all().unwrap();
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn properties_json_escapes() {
        let props = BTreeMap::from([("k".to_string(), "v \"q\"".to_string())]);
        assert_eq!(properties_json(&props), r#"{"k":"v \"q\""}"#);
    }
}
