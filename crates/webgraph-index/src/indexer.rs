//! Encodes records and writes them to a document store.
//!
//! Records lacking a key field are refused by the codec; the indexer logs and
//! counts them and carries on with the batch. Codec errors abort the batch.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use webgraph_codec::{Clock, Encoded, IdSource, RecordCodec, SystemClock, UlidSource};
use webgraph_types::{Record, RecordKind};

use crate::error::IndexError;
use crate::store::DocumentStore;

/// Outcome of indexing a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Documents written to the store
    pub written: usize,
    /// Records refused by the codec
    pub refused: usize,
    /// Written documents per record kind
    pub by_kind: BTreeMap<RecordKind, usize>,
}

impl IndexStats {
    /// Records seen, written or refused.
    pub fn total(&self) -> usize {
        self.written + self.refused
    }
}

/// Writes encoded records to a [`DocumentStore`].
pub struct GraphIndexer<S, C = SystemClock, I = UlidSource> {
    store: Arc<S>,
    codec: RecordCodec<C, I>,
}

impl<S: DocumentStore> GraphIndexer<S> {
    /// Indexer using the system clock and ULID identifiers.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_codec(store, RecordCodec::system())
    }
}

impl<S: DocumentStore, C: Clock, I: IdSource> GraphIndexer<S, C, I> {
    pub fn with_codec(store: Arc<S>, codec: RecordCodec<C, I>) -> Self {
        Self { store, codec }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn codec(&self) -> &RecordCodec<C, I> {
        &self.codec
    }

    /// Encode one record and write the document, unless refused.
    ///
    /// Returns the encoding outcome so callers can see the generated id.
    pub fn index_record(&self, record: &Record) -> Result<Encoded, IndexError> {
        let encoded = self.codec.encode(record)?;
        if let Some(document) = encoded.as_document() {
            self.store.write(document)?;
        }
        Ok(encoded)
    }

    /// Index a batch of records. Pending writes are not committed.
    pub fn index_records(&self, records: &[Record]) -> Result<IndexStats, IndexError> {
        let mut stats = IndexStats::default();

        for record in records {
            match self.index_record(record)? {
                Encoded::Document(_) => {
                    stats.written += 1;
                    *stats.by_kind.entry(record.kind()).or_insert(0) += 1;
                }
                Encoded::Refused(refusal) => {
                    debug!(%refusal, "Skipped refused record");
                    stats.refused += 1;
                }
            }
        }

        info!(
            written = stats.written,
            refused = stats.refused,
            "Indexed record batch"
        );
        Ok(stats)
    }

    /// Make written documents visible to readers.
    pub fn commit(&self) -> Result<(), IndexError> {
        self.store.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use webgraph_codec::{CodecError, ManualClock, SequentialIds};
    use webgraph_types::{
        NodeLink, PageItem, PrecisionException, WebEntity, WebEntityCreationRule, WebEntityLink,
    };

    fn indexer() -> GraphIndexer<MemoryStore, ManualClock, SequentialIds> {
        let clock = ManualClock::new(Utc.timestamp_millis_opt(1_706_540_400_000).unwrap());
        GraphIndexer::with_codec(
            Arc::new(MemoryStore::new()),
            RecordCodec::new(clock, SequentialIds::new("id")),
        )
    }

    #[test]
    fn test_index_record_writes_document() {
        let indexer = indexer();
        let page = PageItem::new("s:http|h:com|h:example|");

        let encoded = indexer.index_record(&page.into()).unwrap();
        let id = encoded.as_document().and_then(|d| d.id()).unwrap();
        assert_eq!(id, "id-1");
        assert!(indexer.store().get("id-1").unwrap().is_some());
    }

    #[test]
    fn test_batch_counts_refusals() {
        let indexer = indexer();
        let records: Vec<Record> = vec![
            PageItem::new("s:http|h:com|h:a|").into(),
            PageItem::default().into(),
            NodeLink::new("s:http|h:com|h:a|", "s:http|h:com|h:b|", 2).into(),
            NodeLink::new("s:http|h:com|h:a|", "", 1).into(),
            WebEntityLink::new("we-1", "we-2", 3).into(),
            PrecisionException::new("s:http|h:com|h:a|").into(),
            PrecisionException::default().into(),
            WebEntity::new("Example").into(),
        ];

        let stats = indexer.index_records(&records).unwrap();
        assert_eq!(stats.written, 5);
        assert_eq!(stats.refused, 3);
        assert_eq!(stats.total(), records.len());
        assert_eq!(stats.by_kind.get(&RecordKind::PageItem), Some(&1));
        assert_eq!(stats.by_kind.get(&RecordKind::NodeLink), Some(&1));
        assert_eq!(stats.by_kind.get(&RecordKind::WebEntityNodeLink), None);
        assert_eq!(indexer.store().len().unwrap(), 5);
    }

    #[test]
    fn test_batch_aborts_on_invalid_creation_rule() {
        let indexer = indexer();
        let records: Vec<Record> = vec![
            PageItem::new("s:http|h:com|h:a|").into(),
            WebEntityCreationRule::new(None, None).into(),
            PageItem::new("s:http|h:com|h:b|").into(),
        ];

        let err = indexer.index_records(&records).unwrap_err();
        assert!(matches!(
            err,
            IndexError::Codec(CodecError::InvalidCreationRule(_))
        ));
        // Records before the failure were written.
        assert_eq!(indexer.store().len().unwrap(), 1);
    }
}
