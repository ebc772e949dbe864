//! Document store error types.

use thiserror::Error;

use webgraph_codec::CodecError;

/// Errors that can occur while storing or loading graph documents.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Tantivy index error
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Schema mismatch
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Writer or in-memory store lock is poisoned
    #[error("Store is locked: {0}")]
    Locked(String),
}
