//! Raw index hits and their display form.

use std::collections::BTreeMap;

use serde::Serialize;

/// One record yielded by the index for a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHit {
    /// Document path, relative to the document root.
    pub path: String,
    /// Document title.
    pub title: String,
    /// Size in bytes, when known.
    pub size: Option<u64>,
    /// Last-modified time as Unix seconds, when known.
    pub last_modified: Option<i64>,
    /// Relevance rank.
    pub rank: u32,
    /// 1-based position of the hit in the full result list.
    pub record_count: usize,
    /// Free-text description or body.
    pub description: Option<String>,
    /// Any further named properties of the document.
    pub properties: BTreeMap<String, String>,
}

/// An extra property copied onto a display hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraProperty {
    /// Property name, as declared in the configuration.
    pub name: String,
    /// Property value; `None` when the document lacks it.
    pub value: Option<String>,
}

/// A presentation-ready hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayHit {
    /// Document path.
    pub path: String,
    /// Document title.
    pub title: String,
    /// Human-readable size, empty when unknown.
    pub size: String,
    /// Calendar date of the last modification, empty when unknown.
    pub date: String,
    /// Relevance rank.
    pub rank: u32,
    /// 1-based position of the hit in the full result list.
    pub record_count: usize,
    /// Processed description: excerpted, highlighted and truncated.
    pub description: String,
    /// Extra properties in declared order.
    pub extra: Vec<ExtraProperty>,
}

impl DisplayHit {
    /// Returns the value of an extra property by name.
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }
}
