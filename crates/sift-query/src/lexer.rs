//! Splits a keyword query into tokens with byte offsets.

use crate::error::{QueryError, QueryErrorKind};

/// The kinds of token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare word.
    Term(String),
    /// The contents of a quoted phrase, quotes removed.
    Phrase(String),
    /// `AND` in any case.
    And,
    /// `OR` in any case.
    Or,
    /// `NOT` in any case, or a leading `-`.
    Not,
    /// `(`
    Open,
    /// `)`
    Close,
    /// `name=`, carrying the property name.
    Property(String),
}

impl TokenKind {
    /// Returns the operator a bare word stands for, if any.
    fn operator(word: &str) -> Option<Self> {
        [("and", Self::And), ("or", Self::Or), ("not", Self::Not)]
            .into_iter()
            .find_map(|(name, kind)| word.eq_ignore_ascii_case(name).then_some(kind))
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was read.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Returns true for characters that end a bare word.
fn ends_word(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"')
}

/// Tokenizes a query.
///
/// Empty phrases and stray `=` signs are skipped. A `-` directly before a word
/// negates it; inside a word it is part of the word.
pub fn tokenize(query: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(c) = query[offset..].chars().next() {
        let start = offset;
        let rest = &query[start..];

        if c.is_whitespace() {
            offset += c.len_utf8();
            continue;
        }

        let (kind, len) = match c {
            '(' => (Some(TokenKind::Open), 1),
            ')' => (Some(TokenKind::Close), 1),
            '-' => (Some(TokenKind::Not), 1),
            '"' => {
                let Some(close) = rest[1..].find('"') else {
                    return Err(QueryError::new(QueryErrorKind::UnclosedQuote, start, query));
                };
                let content = &rest[1..=close];
                let kind = (!content.trim().is_empty())
                    .then(|| TokenKind::Phrase(content.to_string()));
                (kind, close + 2)
            }
            _ => {
                let end = rest.find(ends_word).unwrap_or(rest.len());
                let word = &rest[..end];
                match word.split_once('=') {
                    Some(("", _)) => (None, 1),
                    Some((name, _)) => {
                        (Some(TokenKind::Property(name.to_string())), name.len() + 1)
                    }
                    None => {
                        let kind = TokenKind::operator(word)
                            .unwrap_or_else(|| TokenKind::Term(word.to_string()));
                        (Some(kind), end)
                    }
                }
            }
        };

        if let Some(kind) = kind {
            tokens.push(Token {
                kind,
                offset: start,
            });
        }
        offset += len;
    }

    Ok(tokens)
}
