//! Batch indexing of a crawl graph, refusals included.

use pretty_assertions::assert_eq;

use e2e_tests::{crawl_graph, TestHarness};
use webgraph_codec::CodecError;
use webgraph_index::IndexError;
use webgraph_types::{PageItem, Record, RecordKind, WebEntityCreationRule};

#[test]
fn test_crawl_graph_batch() {
    let harness = TestHarness::new();
    let records = crawl_graph();

    let stats = harness.indexer.index_records(&records).unwrap();
    harness.indexer.commit().unwrap();

    assert_eq!(stats.refused, 3);
    assert_eq!(stats.written, 11);
    assert_eq!(stats.total(), records.len());
    assert_eq!(harness.store.num_docs(), 11);

    let expected = [
        (RecordKind::PageItem, 3),
        (RecordKind::NodeLink, 2),
        (RecordKind::PrecisionException, 1),
        (RecordKind::WebEntity, 2),
        (RecordKind::WebEntityNodeLink, 1),
        (RecordKind::WebEntityLink, 1),
        (RecordKind::WebEntityCreationRule, 1),
    ];
    for (kind, count) in expected {
        assert_eq!(stats.by_kind.get(&kind), Some(&count), "{kind}");
        let records = harness.reader.records_of_kind(kind).unwrap();
        assert_eq!(records.len(), count, "{kind}");
        assert!(records.iter().all(|record| record.kind() == kind));
    }
}

#[test]
fn test_uncommitted_batch_is_invisible() {
    let harness = TestHarness::new();
    harness.indexer.index_records(&crawl_graph()).unwrap();

    assert!(harness
        .reader
        .records_of_kind(RecordKind::PageItem)
        .unwrap()
        .is_empty());

    harness.store.rollback().unwrap();
    harness.indexer.commit().unwrap();
    assert_eq!(harness.store.num_docs(), 0);
}

#[test]
fn test_invalid_creation_rule_aborts_batch() {
    let harness = TestHarness::new();
    let records: Vec<Record> = vec![
        PageItem::new("s:http|h:fr|h:sciencespo|").into(),
        WebEntityCreationRule::new(None, None).into(),
        PageItem::new("s:http|h:org|h:wikipedia|").into(),
    ];

    let err = harness.indexer.index_records(&records).unwrap_err();
    assert!(matches!(
        err,
        IndexError::Codec(CodecError::InvalidCreationRule(_))
    ));

    harness.indexer.commit().unwrap();
    assert_eq!(harness.store.num_docs(), 1);
}
