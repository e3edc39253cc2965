//! Tantivy schema: one document per source file.
//!
//! | field        | content                                   | indexing          |
//! |--------------|-------------------------------------------|-------------------|
//! | `path`       | path relative to the document root        | exact, stored     |
//! | `title`      | title                                     | analyzed, stored  |
//! | `body`       | plain text                                | analyzed, stored  |
//! | `size`       | bytes                                     | stored            |
//! | `mtime`      | modification time                         | date, fast, stored|
//! | `props`      | `name=token` per analyzed property token  | exact             |
//! | `props_json` | all properties as a JSON object           | stored            |

use tantivy::schema::{
    DateOptions, Field, IndexRecordOption, NumericOptions, STORED, STRING, Schema,
    TextFieldIndexing, TextOptions,
};

use crate::analyzer::SIFT_TOKENIZER;

/// Score multipliers for the default search fields.
pub mod boost {
    /// Title matches.
    pub const TITLE: f32 = 3.0;
    /// Body matches.
    pub const BODY: f32 = 1.0;
}

/// The schema and its field handles.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// Tantivy's schema.
    schema: Schema,
    /// `path`
    pub path: Field,
    /// `title`
    pub title: Field,
    /// `body`
    pub body: Field,
    /// `size`
    pub size: Field,
    /// `mtime`
    pub mtime: Field,
    /// `props`
    pub props: Field,
    /// `props_json`
    pub props_json: Field,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSchema {
    /// Builds the schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        // Positions are kept for phrase queries
        let text = TextOptions::default().set_stored().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(SIFT_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );

        let path = builder.add_text_field("path", STRING | STORED);
        let title = builder.add_text_field("title", text.clone());
        let body = builder.add_text_field("body", text);
        let size = builder.add_u64_field("size", NumericOptions::default().set_stored());
        let mtime = builder.add_date_field(
            "mtime",
            DateOptions::default().set_stored().set_indexed().set_fast(),
        );
        let props = builder.add_text_field("props", STRING);
        let props_json = builder.add_text_field("props_json", STORED);

        Self {
            schema: builder.build(),
            path,
            title,
            body,
            size,
            mtime,
            props,
            props_json,
        }
    }

    /// Returns Tantivy's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// The `props` term for one analyzed token of property `name`.
pub fn property_term(name: &str, token: &str) -> String {
    format!("{}={token}", name.to_lowercase())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_field_exists() {
        let schema = IndexSchema::new();
        for name in ["path", "title", "body", "size", "mtime", "props", "props_json"] {
            assert!(schema.schema().get_field(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn only_text_fields_are_analyzed() {
        let schema = IndexSchema::new();
        let analyzed = |field| {
            schema
                .schema()
                .get_field_entry(field)
                .field_type()
                .get_index_record_option()
                .is_some_and(|o| o.has_positions())
        };
        assert!(analyzed(schema.title));
        assert!(analyzed(schema.body));
        assert!(!analyzed(schema.path));
        assert!(!analyzed(schema.props));
    }

    #[test]
    fn property_name_is_lowercased() {
        assert_eq!(property_term("Author", "jane"), "author=jane");
    }
}
