//! # webgraph-index
//!
//! Document store for encoded graph records, backed by Tantivy.
//!
//! Every document field is stored untokenized, so documents come back exactly
//! as the codec wrote them and any field can be matched by term.
//!
//! ## Features
//! - `DocumentStore` seam with in-memory and Tantivy implementations
//! - Replace-on-write by `ID`, or by `LRU` for precision exceptions
//! - Batch indexing that skips refused records and counts them
//! - Decoding reader by kind or by id

pub mod document;
pub mod error;
pub mod index;
pub mod indexer;
pub mod reader;
pub mod schema;
pub mod store;
pub mod tantivy_store;

pub use document::{from_tantivy_doc, to_tantivy_doc};
pub use error::IndexError;
pub use index::{open_or_create_index, GraphIndex, GraphIndexConfig};
pub use indexer::{GraphIndexer, IndexStats};
pub use reader::GraphReader;
pub use schema::{build_graph_schema, GraphSchema};
pub use store::{DocumentStore, MemoryStore};
pub use tantivy_store::TantivyStore;
