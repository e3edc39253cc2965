//! Query string generation.
//!
//! The index receives one query string per request: the user's keywords with
//! any property filters ANDed in. The format is pluggable through [`QueryPolicy`].

use std::str::FromStr;

use thiserror::Error;

/// A `name=value` restriction on a document property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    /// Property name.
    pub name: String,
    /// Required value; may contain several words.
    pub value: String,
}

/// Error parsing a `name=value` filter argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid property filter '{0}': expected name=value")]
pub struct FilterParseError(pub String);

impl PropertyFilter {
    /// Creates a filter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for PropertyFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| FilterParseError(s.to_string()))?;
        let (name, value) = (name.trim(), value.trim());
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.');
        if !valid_name || value.is_empty() {
            return Err(FilterParseError(s.to_string()));
        }
        Ok(Self::new(name, value))
    }
}

/// Turns keywords and filters into the query string sent to the index.
pub trait QueryPolicy {
    /// Generates the query string. Returns an empty string when there is nothing to search for.
    fn generate(&self, keywords: &str, filters: &[PropertyFilter]) -> String;
}

/// The default policy: `(keywords) AND name=(value) AND ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPolicy;

impl QueryPolicy for StandardPolicy {
    fn generate(&self, keywords: &str, filters: &[PropertyFilter]) -> String {
        let keywords = keywords.trim();
        let mut clauses = Vec::with_capacity(filters.len() + 1);

        if !keywords.is_empty() {
            if filters.is_empty() {
                clauses.push(keywords.to_string());
            } else {
                clauses.push(format!("({keywords})"));
            }
        }

        for filter in filters {
            let value: String = filter
                .value
                .chars()
                .filter(|c| *c != '(' && *c != ')')
                .collect();
            if value.trim().is_empty() {
                continue;
            }
            clauses.push(format!("{}=({})", filter.name, value.trim()));
        }

        clauses.join(" AND ")
    }
}

/// Collects keywords and property filters for one search.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Raw user keywords.
    keywords: String,
    /// Property restrictions.
    filters: Vec<PropertyFilter>,
}

impl QueryBuilder {
    /// Starts a query from raw keywords.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            filters: Vec::new(),
        }
    }

    /// Adds a property filter.
    pub fn filter(mut self, filter: PropertyFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds several property filters.
    pub fn filters(mut self, filters: impl IntoIterator<Item = PropertyFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Returns the raw keywords.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Builds the query string with the standard policy.
    pub fn build(&self) -> String {
        self.build_with(&StandardPolicy)
    }

    /// Builds the query string with a custom policy.
    pub fn build_with(&self, policy: &dyn QueryPolicy) -> String {
        policy.generate(&self.keywords, &self.filters)
    }
}
