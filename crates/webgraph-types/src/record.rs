//! The closed set of record kinds sharing one document schema.

use serde::{Deserialize, Serialize};

use crate::entity::{WebEntity, WebEntityCreationRule};
use crate::error::GraphError;
use crate::link::{NodeLink, WebEntityLink, WebEntityNodeLink};
use crate::page::{PageItem, PrecisionException};

/// Record kinds, as written in a document's discriminator field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "PAGE_ITEM")]
    PageItem,
    #[serde(rename = "NODE_LINK")]
    NodeLink,
    #[serde(rename = "PRECISION_EXCEPTION")]
    PrecisionException,
    #[serde(rename = "WEBENTITY")]
    WebEntity,
    #[serde(rename = "WEBENTITY_NODE_LINK")]
    WebEntityNodeLink,
    #[serde(rename = "WEBENTITY_LINK")]
    WebEntityLink,
    #[serde(rename = "WEBENTITY_CREATION_RULE")]
    WebEntityCreationRule,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::PageItem,
        RecordKind::NodeLink,
        RecordKind::PrecisionException,
        RecordKind::WebEntity,
        RecordKind::WebEntityNodeLink,
        RecordKind::WebEntityLink,
        RecordKind::WebEntityCreationRule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::PageItem => "PAGE_ITEM",
            RecordKind::NodeLink => "NODE_LINK",
            RecordKind::PrecisionException => "PRECISION_EXCEPTION",
            RecordKind::WebEntity => "WEBENTITY",
            RecordKind::WebEntityNodeLink => "WEBENTITY_NODE_LINK",
            RecordKind::WebEntityLink => "WEBENTITY_LINK",
            RecordKind::WebEntityCreationRule => "WEBENTITY_CREATION_RULE",
        }
    }

    /// Parse from string, returning None for unknown kinds.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Whether documents of this kind carry an `ID` field.
    ///
    /// Precision exceptions are keyed by their LRU instead.
    pub fn has_identity(&self) -> bool {
        !matches!(self, RecordKind::PrecisionException)
    }

    /// Whether documents of this kind carry creation/modification dates.
    pub fn has_timestamps(&self) -> bool {
        !matches!(
            self,
            RecordKind::PrecisionException | RecordKind::WebEntityNodeLink
        )
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GraphError::InvalidInput(format!("unknown record kind: {s}")))
    }
}

/// Any record the graph store persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    PageItem(PageItem),
    NodeLink(NodeLink),
    PrecisionException(PrecisionException),
    WebEntity(WebEntity),
    WebEntityNodeLink(WebEntityNodeLink),
    WebEntityLink(WebEntityLink),
    WebEntityCreationRule(WebEntityCreationRule),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::PageItem(_) => RecordKind::PageItem,
            Record::NodeLink(_) => RecordKind::NodeLink,
            Record::PrecisionException(_) => RecordKind::PrecisionException,
            Record::WebEntity(_) => RecordKind::WebEntity,
            Record::WebEntityNodeLink(_) => RecordKind::WebEntityNodeLink,
            Record::WebEntityLink(_) => RecordKind::WebEntityLink,
            Record::WebEntityCreationRule(_) => RecordKind::WebEntityCreationRule,
        }
    }

    /// The key the store knows this record by, if it has one yet.
    ///
    /// For precision exceptions this is the LRU.
    pub fn key(&self) -> Option<&str> {
        match self {
            Record::PageItem(r) => r.id.as_deref(),
            Record::NodeLink(r) => r.id.as_deref(),
            Record::PrecisionException(r) => r.lru.as_deref(),
            Record::WebEntity(r) => r.id.as_deref(),
            Record::WebEntityNodeLink(r) => r.id.as_deref(),
            Record::WebEntityLink(r) => r.id.as_deref(),
            Record::WebEntityCreationRule(r) => r.id.as_deref(),
        }
    }
}

impl From<PageItem> for Record {
    fn from(r: PageItem) -> Self {
        Record::PageItem(r)
    }
}

impl From<NodeLink> for Record {
    fn from(r: NodeLink) -> Self {
        Record::NodeLink(r)
    }
}

impl From<PrecisionException> for Record {
    fn from(r: PrecisionException) -> Self {
        Record::PrecisionException(r)
    }
}

impl From<WebEntity> for Record {
    fn from(r: WebEntity) -> Self {
        Record::WebEntity(r)
    }
}

impl From<WebEntityNodeLink> for Record {
    fn from(r: WebEntityNodeLink) -> Self {
        Record::WebEntityNodeLink(r)
    }
}

impl From<WebEntityLink> for Record {
    fn from(r: WebEntityLink) -> Self {
        Record::WebEntityLink(r)
    }
}

impl From<WebEntityCreationRule> for Record {
    fn from(r: WebEntityCreationRule) -> Self {
        Record::WebEntityCreationRule(r)
    }
}
