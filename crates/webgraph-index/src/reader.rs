//! Reads documents back from a store and decodes them into records.

use std::sync::Arc;

use tracing::debug;

use webgraph_codec::decode_as;
use webgraph_types::{Record, RecordKind};

use crate::error::IndexError;
use crate::store::DocumentStore;

/// Decoding view over a [`DocumentStore`].
pub struct GraphReader<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> GraphReader<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every visible record of `kind`.
    pub fn records_of_kind(&self, kind: RecordKind) -> Result<Vec<Record>, IndexError> {
        let records: Vec<Record> = self
            .store
            .documents_by_kind(kind)?
            .iter()
            .map(|document| decode_as(document, kind))
            .collect();

        debug!(kind = %kind, count = records.len(), "Decoded records");
        Ok(records)
    }

    /// The record stored under `id`, with its kind read from the document.
    pub fn record(&self, id: &str) -> Result<Option<Record>, IndexError> {
        match self.store.get(id)? {
            Some(document) => Ok(Some(webgraph_codec::decode(&document)?)),
            None => Ok(None),
        }
    }
}
