//! Identity and date stamping across rewrites of the same record.

use pretty_assertions::assert_eq;

use e2e_tests::{base_instant, sample_entity, sample_page, TestHarness};
use webgraph_index::DocumentStore;
use webgraph_types::{PrecisionException, Record, RecordKind, WebEntityLink, WebEntityStatus};

const LRU: &str = "s:http|h:fr|h:sciencespo|h:www|";

#[test]
fn test_web_entity_rewrite_keeps_id_and_creation_date() {
    let harness = TestHarness::new();
    let mut entity = sample_entity("sciencespo", LRU);
    entity.creation_date = None;
    harness.index_and_commit(entity);

    let Some(Record::WebEntity(mut stored)) = harness.reader.record("sciencespo").unwrap() else {
        panic!("expected stored web entity");
    };
    assert_eq!(stored.creation_date, Some(base_instant()));

    harness.clock().advance_ms(60_000);
    stored.status = WebEntityStatus::Out;
    stored.lru_set.insert("s:https|h:fr|h:sciencespo|h:www|".to_string());
    let id = harness.index_and_commit(stored);
    assert_eq!(id.as_deref(), Some("sciencespo"));

    assert_eq!(harness.store.num_docs(), 1);
    let Some(Record::WebEntity(rewritten)) = harness.reader.record("sciencespo").unwrap() else {
        panic!("expected rewritten web entity");
    };
    assert_eq!(rewritten.status, WebEntityStatus::Out);
    assert_eq!(rewritten.lru_set.len(), 2);
    assert_eq!(rewritten.creation_date, Some(base_instant()));
    let modified = rewritten.last_modification_date.unwrap();
    assert_eq!(modified.timestamp_millis() - base_instant().timestamp_millis(), 60_000);
}

#[test]
fn test_page_rewrite_gets_new_id() {
    let harness = TestHarness::new();
    let first = harness.index_and_commit(sample_page(LRU)).unwrap();

    let Some(Record::PageItem(stored)) = harness.reader.record(&first).unwrap() else {
        panic!("expected stored page");
    };
    let second = harness.index_and_commit(stored).unwrap();

    assert_ne!(first, second);
    let pages = harness.reader.records_of_kind(RecordKind::PageItem).unwrap();
    assert_eq!(pages.len(), 2);
}

#[test]
fn test_web_entity_link_supplied_id_replaces() {
    let harness = TestHarness::new();
    harness.index_and_commit(WebEntityLink::new("a", "b", 1).with_id("link"));
    harness.index_and_commit(WebEntityLink::new("a", "b", 5).with_id("link"));

    let links = harness
        .reader
        .records_of_kind(RecordKind::WebEntityLink)
        .unwrap();
    assert_eq!(links.len(), 1);
    let Record::WebEntityLink(link) = &links[0] else {
        panic!("expected web entity link");
    };
    assert_eq!(link.weight, 5);
}

#[test]
fn test_precision_exception_replaced_by_lru() {
    let harness = TestHarness::new();
    harness.index_and_commit(PrecisionException::new(LRU));
    harness.index_and_commit(PrecisionException::new(LRU));
    harness.index_and_commit(PrecisionException::new("s:http|h:org|h:wikipedia|"));

    let exceptions = harness
        .store
        .documents_by_kind(RecordKind::PrecisionException)
        .unwrap();
    assert_eq!(exceptions.len(), 2);
}

#[test]
fn test_modification_date_follows_clock() {
    let harness = TestHarness::new();
    let entity = sample_entity("sciencespo", LRU);

    harness.index_and_commit(entity.clone());
    let Some(Record::WebEntity(first)) = harness.reader.record("sciencespo").unwrap() else {
        panic!("expected web entity");
    };

    harness.clock().advance_ms(1);
    harness.index_and_commit(entity);
    let Some(Record::WebEntity(second)) = harness.reader.record("sciencespo").unwrap() else {
        panic!("expected web entity");
    };

    assert!(second.last_modification_date > first.last_modification_date);
    assert_eq!(second.creation_date, first.creation_date);
}
