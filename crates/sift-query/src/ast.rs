//! Parsed form of a keyword query, ready for an index to compile.

use std::fmt;

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single word.
    Term(String),
    /// Words that must appear adjacent and in order.
    Phrase(Vec<String>),
    /// Documents must not match the inner expression.
    Not(Box<Self>),
    /// Every sub-expression must match.
    And(Vec<Self>),
    /// At least one sub-expression must match.
    Or(Vec<Self>),
    /// The inner expression must match the named property (`name=value`).
    Field {
        /// Property name: `title`, `body`, `path` or a document property.
        name: String,
        /// What the property must match.
        expr: Box<Self>,
    },
}

impl QueryExpr {
    /// Builds a conjunction, merging nested conjunctions. One operand is returned as is.
    pub fn and(exprs: Vec<Self>) -> Self {
        collapse(exprs, Self::And, |e| match e {
            Self::And(inner) => Ok(inner),
            other => Err(other),
        })
    }

    /// Builds a disjunction, merging nested disjunctions. One operand is returned as is.
    pub fn or(exprs: Vec<Self>) -> Self {
        collapse(exprs, Self::Or, |e| match e {
            Self::Or(inner) => Ok(inner),
            other => Err(other),
        })
    }

    /// Formats the expression back into query syntax that parses to the same tree.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term(word) => word.clone(),
            Self::Phrase(words) => format!("\"{}\"", words.join(" ")),
            Self::Not(inner) => format!("NOT {}", inner.operand()),
            Self::And(exprs) => join(exprs, " AND "),
            Self::Or(exprs) => join(exprs, " OR "),
            Self::Field { name, expr } => format!("{name}=({})", expr.to_query_string()),
        }
    }

    /// Formats the expression as an operand, grouping compound expressions.
    fn operand(&self) -> String {
        match self {
            Self::And(_) | Self::Or(_) => format!("({})", self.to_query_string()),
            _ => self.to_query_string(),
        }
    }
}

/// Flattens operands that `split` recognizes as the same operator, then wraps
/// the result with `wrap` unless a single operand remains.
fn collapse(
    exprs: Vec<QueryExpr>,
    wrap: fn(Vec<QueryExpr>) -> QueryExpr,
    split: fn(QueryExpr) -> Result<Vec<QueryExpr>, QueryExpr>,
) -> QueryExpr {
    let mut flat = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match split(expr) {
            Ok(inner) => flat.extend(inner),
            Err(single) => flat.push(single),
        }
    }
    match <[QueryExpr; 1]>::try_from(flat) {
        Ok([single]) => single,
        Err(flat) => wrap(flat),
    }
}

/// Joins operands with an operator.
fn join(exprs: &[QueryExpr], separator: &str) -> String {
    exprs
        .iter()
        .map(QueryExpr::operand)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
