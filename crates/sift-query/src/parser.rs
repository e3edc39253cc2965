//! Recursive descent parser for the keyword query language.
//!
//! ```text
//! query    → any
//! any      → all ("OR" all)*
//! all      → negation (("AND")? negation)*
//! negation → "NOT" negation | atom
//! atom     → TERM | PHRASE | PROPERTY value | "(" any ")"
//! value    → TERM | PHRASE | "(" any ")"
//! ```
//!
//! Adjacent expressions are ANDed; AND binds tighter than OR.

use crate::{
    ast::QueryExpr,
    error::{QueryError, QueryErrorKind},
    lexer::{Token, TokenKind, tokenize},
};

/// Parser state over the tokens of one query.
struct Parser<'a> {
    /// The query text, for error reporting.
    query: &'a str,
    /// Tokens not yet consumed.
    rest: &'a [Token],
}

impl<'a> Parser<'a> {
    /// Returns the next token's kind without consuming it.
    fn peek(&self) -> Option<&'a TokenKind> {
        self.rest.first().map(|t| &t.kind)
    }

    /// Consumes the next token.
    fn bump(&mut self) -> Option<&'a Token> {
        let (first, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(first)
    }

    /// Consumes the next token if it is `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.peek() == Some(kind);
        if matched {
            self.rest = &self.rest[1..];
        }
        matched
    }

    /// Builds an error at the next token, or at the end of the query.
    fn error(&self, kind: QueryErrorKind) -> QueryError {
        let offset = self.rest.first().map_or(self.query.len(), |t| t.offset);
        QueryError::new(kind, offset, self.query)
    }

    /// any → all ("OR" all)*
    fn any(&mut self) -> Result<QueryExpr, QueryError> {
        let mut alternatives = vec![self.all()?];
        while self.eat(&TokenKind::Or) {
            alternatives.push(self.all()?);
        }
        Ok(QueryExpr::or(alternatives))
    }

    /// all → negation (("AND")? negation)*
    fn all(&mut self) -> Result<QueryExpr, QueryError> {
        let mut required = vec![self.negation()?];
        loop {
            if self.eat(&TokenKind::And) {
                required.push(self.negation()?);
                continue;
            }
            match self.peek() {
                Some(TokenKind::Or | TokenKind::Close) | None => break,
                Some(_) => required.push(self.negation()?),
            }
        }
        Ok(QueryExpr::and(required))
    }

    /// negation → "NOT" negation | atom
    fn negation(&mut self) -> Result<QueryExpr, QueryError> {
        if self.eat(&TokenKind::Not) {
            return Ok(QueryExpr::Not(Box::new(self.negation()?)));
        }
        self.atom()
    }

    /// atom → TERM | PHRASE | PROPERTY value | "(" any ")"
    fn atom(&mut self) -> Result<QueryExpr, QueryError> {
        match self.peek() {
            Some(TokenKind::Property(name)) => {
                self.bump();
                let Some(expr) = self.value()? else {
                    return Err(self.error(QueryErrorKind::MissingValue));
                };
                Ok(QueryExpr::Field {
                    name: name.clone(),
                    expr: Box::new(expr),
                })
            }
            Some(TokenKind::And | TokenKind::Or) => {
                Err(self.error(QueryErrorKind::DanglingOperator))
            }
            Some(TokenKind::Close) => Err(self.error(QueryErrorKind::UnexpectedClose)),
            Some(TokenKind::Not) | None => Err(self.error(QueryErrorKind::UnexpectedEnd)),
            Some(_) => self
                .value()?
                .ok_or_else(|| self.error(QueryErrorKind::UnexpectedEnd)),
        }
    }

    /// value → TERM | PHRASE | "(" any ")"
    ///
    /// Returns `None` without consuming anything if no value starts here.
    fn value(&mut self) -> Result<Option<QueryExpr>, QueryError> {
        let expr = match self.peek() {
            Some(TokenKind::Term(word)) => QueryExpr::Term(word.clone()),
            Some(TokenKind::Phrase(text)) => phrase(text),
            Some(TokenKind::Open) => {
                let open = self.bump().map_or(0, |t| t.offset);
                let inner = self.any()?;
                if !self.eat(&TokenKind::Close) {
                    return Err(QueryError::new(QueryErrorKind::UnclosedGroup, open, self.query));
                }
                return Ok(Some(inner));
            }
            _ => return Ok(None),
        };
        self.bump();
        Ok(Some(expr))
    }
}

/// A quoted phrase, or a plain term if it holds a single word.
fn phrase(text: &str) -> QueryExpr {
    let words: Vec<String> = text.split_whitespace().map(String::from).collect();
    match <[String; 1]>::try_from(words) {
        Ok([word]) => QueryExpr::Term(word),
        Err(words) => QueryExpr::Phrase(words),
    }
}

/// Parses a query.
///
/// Returns `Ok(None)` for a blank query.
pub fn parse(query: &str) -> Result<Option<QueryExpr>, QueryError> {
    let tokens = tokenize(query)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut parser = Parser {
        query,
        rest: &tokens,
    };
    let expr = parser.any()?;
    if parser.peek().is_some() {
        return Err(parser.error(QueryErrorKind::UnexpectedClose));
    }
    Ok(Some(expr))
}
