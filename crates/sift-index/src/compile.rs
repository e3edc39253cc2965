//! Query compiler.
//!
//! Compiles a query AST into Tantivy queries. Bare terms and phrases search
//! the title and body; `title=`, `body=` and `path=` restrict to one field,
//! and any other `name=` clause matches a document property.

use std::slice;

use sift_query::QueryExpr;
use tantivy::{
    Term,
    query::{AllQuery, BooleanQuery, BoostQuery, Occur, PhraseQuery, Query, TermQuery},
    schema::{Field, IndexRecordOption},
    tokenizer::TextAnalyzer,
};
use thiserror::Error;

use crate::{
    analyzer::analyze,
    schema::{IndexSchema, boost, property_term},
};

/// Error during query compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    /// Error message.
    pub message: String,
}

impl CompileError {
    /// Creates an error with a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Where a query expression is searched.
#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    /// Title and body, with boosts.
    Default,
    /// One analyzed text field.
    Text(Field, f32),
    /// The exact document path.
    Path,
    /// A named document property.
    Property(&'a str),
}

/// Compiles query AST nodes into Tantivy queries.
#[derive(Clone)]
pub struct QueryCompiler {
    /// Index schema for field references.
    schema: IndexSchema,
    /// Text analyzer for tokenizing query terms.
    analyzer: TextAnalyzer,
}

/// A compiled query, or `None` when nothing searchable remains.
type Compiled = Result<Option<Box<dyn Query>>, CompileError>;

impl QueryCompiler {
    /// Creates a new query compiler.
    pub fn new(schema: IndexSchema, analyzer: TextAnalyzer) -> Self {
        Self { schema, analyzer }
    }

    /// Compiles a query expression into a Tantivy query.
    ///
    /// Returns `None` when every term was removed by analysis (for example, a
    /// query made only of stop words).
    pub fn compile(&mut self, expr: &QueryExpr) -> Compiled {
        self.compile_in(expr, Target::Default)
    }

    /// Compiles an expression against a target.
    fn compile_in(&mut self, expr: &QueryExpr, target: Target<'_>) -> Compiled {
        match expr {
            QueryExpr::Term(text) => Ok(self.compile_words(&[text.clone()], target)),
            QueryExpr::Phrase(words) => Ok(self.compile_words(words, target)),
            QueryExpr::Not(_) => self.compile_and(slice::from_ref(expr), target),
            QueryExpr::And(exprs) => self.compile_and(exprs, target),
            QueryExpr::Or(exprs) => self.compile_or(exprs, target),
            QueryExpr::Field { name, expr } => match target {
                Target::Default => self.compile_field(name, expr),
                _ => Err(CompileError::new("nested field queries not supported")),
            },
        }
    }

    /// Compiles a field-scoped expression.
    fn compile_field(&mut self, name: &str, expr: &QueryExpr) -> Compiled {
        let target = match name.to_lowercase().as_str() {
            "title" => Target::Text(self.schema.title, boost::TITLE),
            "body" => Target::Text(self.schema.body, boost::BODY),
            "path" => Target::Path,
            _ => Target::Property(name),
        };
        self.compile_in(expr, target)
    }

    /// Compiles an AND expression.
    ///
    /// Negated clauses become MUST_NOT. With only negated clauses, all
    /// documents are the base to exclude from.
    fn compile_and(&mut self, exprs: &[QueryExpr], target: Target<'_>) -> Compiled {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        let mut negative: Vec<Box<dyn Query>> = Vec::new();

        for expr in exprs {
            match expr {
                QueryExpr::Not(inner) => {
                    if let Some(q) = self.compile_in(inner, target)? {
                        negative.push(q);
                    }
                }
                other => {
                    if let Some(q) = self.compile_in(other, target)? {
                        clauses.push((Occur::Must, q));
                    }
                }
            }
        }

        if clauses.is_empty() && negative.is_empty() {
            return Ok(None);
        }
        if clauses.is_empty() {
            clauses.push((Occur::Must, Box::new(AllQuery)));
        }
        clauses.extend(negative.into_iter().map(|q| (Occur::MustNot, q)));

        Ok(Some(Box::new(BooleanQuery::new(clauses))))
    }

    /// Compiles an OR expression.
    fn compile_or(&mut self, exprs: &[QueryExpr], target: Target<'_>) -> Compiled {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for expr in exprs {
            if let Some(q) = self.compile_in(expr, target)? {
                clauses.push((Occur::Should, q));
            }
        }
        Ok(boolean(clauses))
    }

    /// Compiles a term or phrase given as words.
    fn compile_words(&mut self, words: &[String], target: Target<'_>) -> Option<Box<dyn Query>> {
        match target {
            Target::Path => {
                let path = words.join(" ");
                let term = Term::from_field_text(self.schema.path, &path);
                Some(Box::new(TermQuery::new(term, IndexRecordOption::Basic)))
            }
            Target::Property(name) => {
                let props = self.schema.props;
                let clauses: Vec<(Occur, Box<dyn Query>)> = self
                    .tokenize(words)
                    .iter()
                    .map(|token| {
                        let term = Term::from_field_text(props, &property_term(name, token));
                        let query: Box<dyn Query> =
                            Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                        (Occur::Must, query)
                    })
                    .collect();
                boolean(clauses)
            }
            Target::Text(field, boost_value) => {
                let tokens = self.tokenize(words);
                text_query(field, boost_value, &tokens)
            }
            Target::Default => {
                let tokens = self.tokenize(words);
                let clauses: Vec<(Occur, Box<dyn Query>)> = [
                    (self.schema.title, boost::TITLE),
                    (self.schema.body, boost::BODY),
                ]
                .into_iter()
                .filter_map(|(field, boost_value)| text_query(field, boost_value, &tokens))
                .map(|q| (Occur::Should, q))
                .collect();
                boolean(clauses)
            }
        }
    }

    /// Tokenizes words with the index analyzer.
    fn tokenize(&mut self, words: &[String]) -> Vec<String> {
        words
            .iter()
            .flat_map(|w| analyze(&mut self.analyzer, w))
            .collect()
    }
}

/// Wraps clauses in a boolean query, or `None` when there are none.
fn boolean(clauses: Vec<(Occur, Box<dyn Query>)>) -> Option<Box<dyn Query>> {
    if clauses.is_empty() {
        return None;
    }
    Some(Box::new(BooleanQuery::new(clauses)))
}

/// Builds a boosted term or phrase query on one field.
fn text_query(field: Field, boost_value: f32, tokens: &[String]) -> Option<Box<dyn Query>> {
    let query: Box<dyn Query> = match tokens {
        [] => return None,
        [token] => Box::new(TermQuery::new(
            Term::from_field_text(field, token),
            IndexRecordOption::WithFreqs,
        )),
        _ => Box::new(PhraseQuery::new(
            tokens
                .iter()
                .map(|t| Term::from_field_text(field, t))
                .collect(),
        )),
    };
    Some(Box::new(BoostQuery::new(query, boost_value)))
}

#[cfg(test)]
mod test {
    use sift_query::{Stopwords, parse};
    use tantivy::tokenizer::Language;

    use super::*;
    use crate::analyzer::build_analyzer;

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(
            IndexSchema::new(),
            build_analyzer(Some(Language::English), &Stopwords::basic()),
        )
    }

    fn compile(query: &str) -> Option<Box<dyn Query>> {
        let expr = parse(query).unwrap().unwrap();
        compiler().compile(&expr).unwrap()
    }

    #[test]
    fn terms_and_phrases_compile() {
        assert!(compile("panic").is_some());
        assert!(compile("\"please help\"").is_some());
        assert!(compile("please OR panic").is_some());
        assert!(compile("please -panic").is_some());
    }

    #[test]
    fn stop_words_only_compiles_to_nothing() {
        assert!(compile("the").is_none());
        assert!(compile("the OR a").is_none());
    }

    #[test]
    fn negation_only_excludes_from_all() {
        let query = format!("{:?}", compile("-panic").unwrap());
        assert!(query.contains("AllQuery"));
    }

    #[test]
    fn field_clauses() {
        assert!(compile("title=guide").is_some());
        assert!(compile("path=docs/a.md").is_some());
        assert!(compile("author=(jane OR john)").is_some());
    }

    #[test]
    fn nested_fields_rejected() {
        let expr = QueryExpr::Field {
            name: "title".into(),
            expr: Box::new(QueryExpr::Field {
                name: "body".into(),
                expr: Box::new(QueryExpr::Term("x".into())),
            }),
        };
        assert!(compiler().compile(&expr).is_err());
    }
}
