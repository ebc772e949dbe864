//! Document store backed by a Tantivy index.
//!
//! The writer is shared via Arc<Mutex>. Writes are not visible until
//! commit() is called, which also reloads the reader.

use std::sync::{Arc, Mutex};

use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::{DocAddress, IndexReader, IndexWriter, Searcher, TantivyDocument, Term};
use tracing::{debug, info, warn};

use webgraph_codec::{Document, FieldName};
use webgraph_types::RecordKind;

use crate::document::{from_tantivy_doc, to_tantivy_doc};
use crate::error::IndexError;
use crate::index::{GraphIndex, GraphIndexConfig};
use crate::schema::GraphSchema;
use crate::store::{DocumentKey, DocumentStore};

/// Tantivy-backed [`DocumentStore`].
pub struct TantivyStore {
    index: GraphIndex,
    schema: GraphSchema,
    writer: Arc<Mutex<IndexWriter>>,
    reader: IndexReader,
}

impl TantivyStore {
    /// Open or create an on-disk store.
    pub fn open(config: GraphIndexConfig) -> Result<Self, IndexError> {
        Self::from_index(GraphIndex::open_or_create(config)?)
    }

    /// Create a store whose index lives in RAM.
    pub fn in_memory() -> Result<Self, IndexError> {
        Self::from_index(GraphIndex::in_memory())
    }

    pub fn from_index(index: GraphIndex) -> Result<Self, IndexError> {
        let writer = index.writer()?;
        let reader = index.reader()?;
        let schema = index.schema().clone();

        Ok(Self {
            index,
            schema,
            writer: Arc::new(Mutex::new(writer)),
            reader,
        })
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    /// Number of committed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Delete the document with the given `ID`.
    pub fn delete_document(&self, id: &str) -> Result<(), IndexError> {
        let writer = self
            .writer
            .lock()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        writer.delete_term(self.term(FieldName::Id, id));

        debug!(id, "Deleted document");
        Ok(())
    }

    /// Rollback uncommitted changes.
    pub fn rollback(&self) -> Result<u64, IndexError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        let opstamp = writer.rollback()?;
        warn!(opstamp, "Rolled back index changes");
        Ok(opstamp)
    }

    fn term(&self, name: FieldName, value: &str) -> Term {
        Term::from_field_text(self.schema.field(name), value)
    }

    fn term_query(&self, name: FieldName, value: &str) -> Box<dyn Query> {
        Box::new(TermQuery::new(
            self.term(name, value),
            IndexRecordOption::Basic,
        ))
    }

    fn load(&self, searcher: &Searcher, address: DocAddress) -> Result<Document, IndexError> {
        let doc: TantivyDocument = searcher.doc(address)?;
        Ok(from_tantivy_doc(&self.schema, &doc))
    }
}

impl DocumentStore for TantivyStore {
    fn write(&self, document: &Document) -> Result<(), IndexError> {
        let doc = to_tantivy_doc(&self.schema, document);

        let writer = self
            .writer
            .lock()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        // Delete existing document with same identity (for update)
        match DocumentKey::of(document) {
            Some(DocumentKey::Id(id)) => {
                writer.delete_term(self.term(FieldName::Id, id));
            }
            Some(DocumentKey::PrecisionLru(lru)) => {
                let same_exception = BooleanQuery::new(vec![
                    (
                        Occur::Must,
                        self.term_query(FieldName::Type, RecordKind::PrecisionException.as_str()),
                    ),
                    (Occur::Must, self.term_query(FieldName::Lru, lru)),
                ]);
                writer.delete_query(Box::new(same_exception))?;
            }
            None => {}
        }

        writer.add_document(doc)?;

        debug!(
            kind = document.get(FieldName::Type).unwrap_or(""),
            id = document.id().unwrap_or(""),
            "Indexed document"
        );
        Ok(())
    }

    fn documents_by_kind(&self, kind: RecordKind) -> Result<Vec<Document>, IndexError> {
        let searcher = self.reader.searcher();
        let query = self.term_query(FieldName::Type, kind.as_str());

        let mut addresses: Vec<DocAddress> =
            searcher.search(&query, &DocSetCollector)?.into_iter().collect();
        addresses.sort();

        let documents = addresses
            .into_iter()
            .map(|address| self.load(&searcher, address))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(kind = %kind, count = documents.len(), "Loaded documents by kind");
        Ok(documents)
    }

    fn get(&self, id: &str) -> Result<Option<Document>, IndexError> {
        let searcher = self.reader.searcher();
        let query = self.term_query(FieldName::Id, id);

        let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
        top_docs
            .into_iter()
            .next()
            .map(|(_score, address)| self.load(&searcher, address))
            .transpose()
    }

    /// Commit pending changes and reload the reader.
    ///
    /// This is expensive - batch writes and commit periodically.
    fn commit(&self) -> Result<(), IndexError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| IndexError::Locked(e.to_string()))?;

        let opstamp = writer.commit()?;
        self.reader.reload()?;
        info!(opstamp, "Committed index changes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(kind: RecordKind, id: Option<&str>, lru: &str) -> Document {
        let mut doc = Document::new();
        if let Some(id) = id {
            doc.add(FieldName::Id, id);
        }
        doc.add(FieldName::Type, kind.as_str());
        doc.add(FieldName::Lru, lru);
        doc
    }

    #[test]
    fn test_writes_invisible_until_commit() {
        let store = TantivyStore::in_memory().unwrap();
        store
            .write(&doc(RecordKind::PageItem, Some("p1"), "s:http|h:com|h:a|"))
            .unwrap();
        assert!(store.get("p1").unwrap().is_none());

        store.commit().unwrap();
        let found = store.get("p1").unwrap().unwrap();
        assert_eq!(found.get(FieldName::Lru), Some("s:http|h:com|h:a|"));
        assert_eq!(store.num_docs(), 1);
    }

    #[test]
    fn test_write_replaces_same_id() {
        let store = TantivyStore::in_memory().unwrap();
        store
            .write(&doc(RecordKind::WebEntity, Some("we"), "s:http|h:com|h:a|"))
            .unwrap();
        store.commit().unwrap();
        store
            .write(&doc(RecordKind::WebEntity, Some("we"), "s:http|h:com|h:b|"))
            .unwrap();
        store.commit().unwrap();

        assert_eq!(store.num_docs(), 1);
        let found = store.get("we").unwrap().unwrap();
        assert_eq!(found.get(FieldName::Lru), Some("s:http|h:com|h:b|"));
    }

    #[test]
    fn test_precision_exception_replaced_by_lru() {
        let store = TantivyStore::in_memory().unwrap();
        let exception = doc(RecordKind::PrecisionException, None, "s:http|h:com|h:a|");
        store.write(&exception).unwrap();
        store.write(&exception).unwrap();
        // A page with the same LRU must survive.
        store
            .write(&doc(RecordKind::PageItem, Some("p1"), "s:http|h:com|h:a|"))
            .unwrap();
        store.commit().unwrap();

        let exceptions = store
            .documents_by_kind(RecordKind::PrecisionException)
            .unwrap();
        assert_eq!(exceptions.len(), 1);
        assert_eq!(store.num_docs(), 2);
    }

    #[test]
    fn test_documents_by_kind() {
        let store = TantivyStore::in_memory().unwrap();
        store
            .write(&doc(RecordKind::PageItem, Some("p1"), "s:http|h:com|h:a|"))
            .unwrap();
        store
            .write(&doc(RecordKind::NodeLink, Some("l1"), "s:http|h:com|h:a|"))
            .unwrap();
        store
            .write(&doc(RecordKind::PageItem, Some("p2"), "s:http|h:com|h:b|"))
            .unwrap();
        store.commit().unwrap();

        let pages = store.documents_by_kind(RecordKind::PageItem).unwrap();
        let ids: Vec<_> = pages.iter().filter_map(|d| d.id()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(
            store.documents_by_kind(RecordKind::NodeLink).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_delete_and_rollback() {
        let store = TantivyStore::in_memory().unwrap();
        store
            .write(&doc(RecordKind::PageItem, Some("p1"), "s:http|h:com|h:a|"))
            .unwrap();
        store.commit().unwrap();

        store.delete_document("p1").unwrap();
        store.rollback().unwrap();
        store.commit().unwrap();
        assert!(store.get("p1").unwrap().is_some());

        store.delete_document("p1").unwrap();
        store.commit().unwrap();
        assert!(store.get("p1").unwrap().is_none());
    }

    #[test]
    fn test_reopen_on_disk_store() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = TantivyStore::open(GraphIndexConfig::new(temp_dir.path())).unwrap();
            store
                .write(&doc(RecordKind::PageItem, Some("p1"), "s:http|h:com|h:a|"))
                .unwrap();
            store.commit().unwrap();
        }

        let store = TantivyStore::open(GraphIndexConfig::new(temp_dir.path())).unwrap();
        assert!(store.get("p1").unwrap().is_some());
        assert_eq!(store.index().path(), Some(temp_dir.path()));
    }
}
