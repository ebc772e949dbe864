//! Weighted links between pages and web entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between two pages, by LRU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub source_lru: Option<String>,

    #[serde(default)]
    pub target_lru: Option<String>,

    /// Number of times the link was seen
    #[serde(default)]
    pub weight: i32,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

impl NodeLink {
    pub fn new(source_lru: impl Into<String>, target_lru: impl Into<String>, weight: i32) -> Self {
        Self {
            source_lru: Some(source_lru.into()),
            target_lru: Some(target_lru.into()),
            weight,
            ..Self::default()
        }
    }
}

/// Link between two web entities, by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebEntityLink {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub source_id: Option<String>,

    #[serde(default)]
    pub target_id: Option<String>,

    #[serde(default)]
    pub weight: i32,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

impl WebEntityLink {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, weight: i32) -> Self {
        Self {
            source_id: Some(source_id.into()),
            target_id: Some(target_id.into()),
            weight,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Link from a web entity to a page. Carries no timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebEntityNodeLink {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub source_id: Option<String>,

    #[serde(default)]
    pub target_lru: Option<String>,

    #[serde(default)]
    pub weight: i32,
}

impl WebEntityNodeLink {
    pub fn new(source_id: impl Into<String>, target_lru: impl Into<String>, weight: i32) -> Self {
        Self {
            source_id: Some(source_id.into()),
            target_lru: Some(target_lru.into()),
            weight,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
