//! # webgraph-types
//!
//! Shared domain types for the web-crawl graph memory store.
//!
//! This crate defines the records the store persists:
//! - Pages: crawled pages keyed by LRU, and precision exceptions
//! - Web entities: groups of LRU prefixes, and the rules that create them
//! - Links: page-to-page, entity-to-entity and entity-to-page
//! - Settings: Configuration types
//!
//! ## Usage
//!
//! ```rust
//! use webgraph_types::{PageItem, Record, RecordKind};
//!
//! let record = Record::from(PageItem::new("s:http|h:org|h:example|"));
//! assert_eq!(record.kind(), RecordKind::PageItem);
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod link;
pub mod lru;
pub mod page;
pub mod record;
pub mod status;
pub mod tags;

pub use config::Settings;
pub use entity::{
    WebEntity, WebEntityCreationRule, DEFAULT_WEBENTITY_CREATION_RULE, UNASSIGNED_WEBENTITY_NAME,
};
pub use error::GraphError;
pub use link::{NodeLink, WebEntityLink, WebEntityNodeLink};
pub use lru::revert_lru;
pub use page::{PageItem, PrecisionException};
pub use record::{Record, RecordKind};
pub use status::{normalize_status, WebEntityStatus};
pub use tags::{add_tag, tag_value_count, Tags};
