//! Page records: crawled pages and precision exceptions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tags::{add_tag, Tags};

/// A crawled page, keyed by its LRU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
    /// Store identity; a fresh one is generated on every write
    #[serde(default)]
    pub id: Option<String>,

    /// LRU of the page (required for persistence)
    #[serde(default)]
    pub lru: Option<String>,

    /// Original URL; derived from the LRU when absent
    #[serde(default)]
    pub url: Option<String>,

    /// Crawler-provided fetch timestamp, kept verbatim
    #[serde(default)]
    pub crawler_timestamp: Option<String>,

    /// Crawl depth
    #[serde(default)]
    pub depth: i32,

    /// Crawler error code, if the fetch failed
    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub http_status_code: i32,

    /// Whether the page is a node of the page graph
    #[serde(default)]
    pub is_node: bool,

    /// Whether links from this page are kept at full precision
    #[serde(default)]
    pub is_full_precision: bool,

    /// Where the page was discovered from (crawl, user, ...)
    #[serde(default)]
    pub source_set: BTreeSet<String>,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

impl PageItem {
    /// Create a page for the given LRU.
    pub fn new(lru: impl Into<String>) -> Self {
        Self {
            lru: Some(lru.into()),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_set.insert(source.into());
        self
    }

    pub fn with_tag(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        add_tag(&mut self.tags, namespace, key, value);
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// An LRU prefix whose pages are always crawled at full precision.
///
/// Keyed by the LRU itself: it has no surrogate id and no timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionException {
    #[serde(default)]
    pub lru: Option<String>,
}

impl PrecisionException {
    pub fn new(lru: impl Into<String>) -> Self {
        Self {
            lru: Some(lru.into()),
        }
    }
}
