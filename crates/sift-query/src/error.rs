//! Syntax errors for the keyword query language.

use thiserror::Error;

/// What went wrong while reading a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryErrorKind {
    /// A `"` with no matching closing quote.
    #[error("unclosed quote")]
    UnclosedQuote,
    /// A `(` with no matching `)`.
    #[error("missing closing parenthesis")]
    UnclosedGroup,
    /// A `)` with no matching `(`.
    #[error("unexpected closing parenthesis")]
    UnexpectedClose,
    /// `AND` or `OR` without an expression on its left.
    #[error("operator without a left-hand expression")]
    DanglingOperator,
    /// `name=` not followed by a term, phrase or group.
    #[error("property filter without a value")]
    MissingValue,
    /// The query ended where an expression was expected.
    #[error("unexpected end of query")]
    UnexpectedEnd,
}

impl QueryErrorKind {
    /// Returns advice for fixing this kind of error.
    pub fn hint(self) -> &'static str {
        match self {
            Self::UnclosedQuote => "add a closing quote (\") to complete the phrase",
            Self::UnclosedGroup => "add a ) to match the opening parenthesis",
            Self::UnexpectedClose => "remove the ) or add a matching (",
            Self::DanglingOperator | Self::UnexpectedEnd => {
                "boolean operators need expressions on both sides, e.g. 'please AND help'"
            }
            Self::MissingValue => "property filters look like name=value or name=(value)",
        }
    }
}

/// A query syntax error located at a byte offset of the query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query syntax error: {kind} at byte {offset}")]
pub struct QueryError {
    /// What went wrong.
    pub kind: QueryErrorKind,
    /// Byte offset of the offending character or token.
    pub offset: usize,
    /// The query as submitted.
    pub query: String,
}

impl QueryError {
    /// Creates an error at `offset` of `query`.
    pub fn new(kind: QueryErrorKind, offset: usize, query: &str) -> Self {
        Self {
            kind,
            offset: offset.min(query.len()),
            query: query.to_string(),
        }
    }

    /// Renders the error over several lines with a caret under the offending
    /// position and a hint.
    pub fn render(&self) -> String {
        let column = self.query.get(..self.offset).map_or(0, |s| s.chars().count());
        format!(
            "{self}\n  {}\n  {}^\nhint: {}",
            self.query,
            " ".repeat(column),
            self.kind.hint()
        )
    }
}
