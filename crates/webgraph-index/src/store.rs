//! Document store interface and an in-memory implementation.
//!
//! A store holds encoded documents. Writing a document replaces any stored
//! document with the same identity: the `ID` value for most kinds, the `LRU`
//! value for precision exceptions, which carry no id.

use std::sync::RwLock;

use tracing::debug;

use webgraph_codec::{Document, FieldName};
use webgraph_types::RecordKind;

use crate::error::IndexError;

/// Persistence seam for encoded graph documents.
pub trait DocumentStore: Send + Sync {
    /// Store a document, replacing one with the same identity.
    fn write(&self, document: &Document) -> Result<(), IndexError>;

    /// All visible documents whose discriminator names `kind`.
    fn documents_by_kind(&self, kind: RecordKind) -> Result<Vec<Document>, IndexError>;

    /// Visible document with the given `ID`.
    fn get(&self, id: &str) -> Result<Option<Document>, IndexError>;

    /// Make pending writes visible to readers.
    fn commit(&self) -> Result<(), IndexError>;
}

/// Identity a stored document is replaced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentKey<'a> {
    Id(&'a str),
    PrecisionLru(&'a str),
}

impl<'a> DocumentKey<'a> {
    pub(crate) fn of(document: &'a Document) -> Option<Self> {
        if document.kind() == Some(RecordKind::PrecisionException) {
            document.get(FieldName::Lru).map(DocumentKey::PrecisionLru)
        } else {
            document.id().map(DocumentKey::Id)
        }
    }
}

/// Store that keeps documents in insertion order, in memory.
///
/// Writes are visible immediately; `commit` does nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> Result<usize, IndexError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| IndexError::Locked(e.to_string()))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.len()? == 0)
    }
}

impl DocumentStore for MemoryStore {
    fn write(&self, document: &Document) -> Result<(), IndexError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        let key = DocumentKey::of(document);
        let existing = key.and_then(|key| {
            documents
                .iter()
                .position(|stored| DocumentKey::of(stored) == Some(key))
        });

        match existing {
            Some(position) => {
                debug!(?key, "Replaced document");
                documents[position] = document.clone();
            }
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    fn documents_by_kind(&self, kind: RecordKind) -> Result<Vec<Document>, IndexError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        Ok(documents
            .iter()
            .filter(|doc| doc.kind() == Some(kind))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<Option<Document>, IndexError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        Ok(documents.iter().find(|doc| doc.id() == Some(id)).cloned())
    }

    fn commit(&self) -> Result<(), IndexError> {
        Ok(())
    }
}
