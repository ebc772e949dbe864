//! Web entities and the rules that create them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::WebEntityStatus;
use crate::tags::{add_tag, Tags};

/// Name given to web entities persisted without one.
pub const UNASSIGNED_WEBENTITY_NAME: &str = "OUTSIDE WEB";

/// LRU written for creation rules that only carry a regular expression.
pub const DEFAULT_WEBENTITY_CREATION_RULE: &str = "DEFAULT_WEBENTITY_CREATION_RULE";

/// A crawled site or actor, grouping one or more LRU prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebEntity {
    /// Store identity; kept across writes once assigned
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// LRU prefixes owned by this entity
    #[serde(default)]
    pub lru_set: BTreeSet<String>,

    #[serde(default)]
    pub status: WebEntityStatus,

    #[serde(default)]
    pub homepage: Option<String>,

    /// Pages the crawler starts from
    #[serde(default)]
    pub startpages: BTreeSet<String>,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

impl WebEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_lru(mut self, lru: impl Into<String>) -> Self {
        self.lru_set.insert(lru.into());
        self
    }

    /// Set the status from free text, normalizing unknown values to `Discovered`.
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = WebEntityStatus::from(status);
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    pub fn with_startpage(mut self, page: impl Into<String>) -> Self {
        self.startpages.insert(page.into());
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

/// Rule deciding how new web entities are cut out of discovered LRUs.
///
/// At least one of `lru` and `regexp` must be set for the rule to be persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebEntityCreationRule {
    #[serde(default)]
    pub id: Option<String>,

    /// LRU prefix the rule applies to
    #[serde(default)]
    pub lru: Option<String>,

    /// Pattern matched against LRUs under the prefix
    #[serde(default)]
    pub regexp: Option<String>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

impl WebEntityCreationRule {
    pub fn new(lru: Option<String>, regexp: Option<String>) -> Self {
        Self {
            lru,
            regexp,
            ..Self::default()
        }
    }

    /// Rule applying to every LRU not covered by a more specific one.
    pub fn default_rule(regexp: impl Into<String>) -> Self {
        Self::new(None, Some(regexp.into()))
    }

    /// True for the catch-all rule.
    pub fn is_default(&self) -> bool {
        self.lru.as_deref() == Some(DEFAULT_WEBENTITY_CREATION_RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_entity_builder() {
        let entity = WebEntity::new("Sciences Po")
            .with_lru("s:http|h:fr|h:sciencespo|")
            .with_lru("s:https|h:fr|h:sciencespo|")
            .with_status("in")
            .with_startpage("http://www.sciencespo.fr");

        assert_eq!(entity.lru_set.len(), 2);
        assert_eq!(entity.status, WebEntityStatus::In);
        assert!(entity.id.is_none());
    }

    #[test]
    fn test_web_entity_serialization() {
        let entity = WebEntity::new("Medialab")
            .with_id("we-1")
            .with_tag("user", "type", "lab");

        let bytes = entity.to_bytes().unwrap();
        let decoded = WebEntity::from_bytes(&bytes).unwrap();
        assert_eq!(entity, decoded);
    }

    #[test]
    fn test_default_rule() {
        let rule = WebEntityCreationRule::default_rule("(s:[a-zA-Z]+\\|(h:[^|]+\\|)+)");
        assert!(rule.lru.is_none());
        assert!(!rule.is_default());

        let stored = WebEntityCreationRule::new(
            Some(DEFAULT_WEBENTITY_CREATION_RULE.to_string()),
            rule.regexp.clone(),
        );
        assert!(stored.is_default());
    }
}
