//! End-to-end test infrastructure for the web graph store.
//!
//! Provides a shared TestHarness and record builders for tests that run
//! records through the codec into an on-disk Tantivy store and back.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use webgraph_codec::{ManualClock, RecordCodec, SequentialIds};
use webgraph_index::{GraphIndexConfig, GraphIndexer, GraphReader, TantivyStore};
use webgraph_types::{
    NodeLink, PageItem, PrecisionException, Record, WebEntity, WebEntityCreationRule,
    WebEntityLink, WebEntityNodeLink,
};

/// Instant the harness clock starts at.
pub const BASE_TS_MS: i64 = 1_706_540_400_000; // 2024-01-29 approx

/// Indexer with a controllable clock and predictable ids (`id-1`, `id-2`, ...).
pub type TestIndexer = GraphIndexer<TantivyStore, ManualClock, SequentialIds>;

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Path of the Tantivy index
    pub index_path: PathBuf,
    pub store: Arc<TantivyStore>,
    pub indexer: TestIndexer,
    pub reader: GraphReader<TantivyStore>,
}

impl TestHarness {
    /// Create a harness with an empty on-disk store in a temp directory.
    pub fn new() -> Self {
        init_test_logging();

        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let index_path = temp_dir.path().join("graph-index");
        let store = Arc::new(
            TantivyStore::open(GraphIndexConfig::new(&index_path))
                .expect("Failed to open test store"),
        );

        let codec = RecordCodec::new(
            ManualClock::new(base_instant()),
            SequentialIds::new("id"),
        );
        let indexer = GraphIndexer::with_codec(store.clone(), codec);
        let reader = GraphReader::new(store.clone());

        Self {
            _temp_dir: temp_dir,
            index_path,
            store,
            indexer,
            reader,
        }
    }

    pub fn clock(&self) -> &ManualClock {
        self.indexer.codec().clock()
    }

    /// Index one record and commit, returning the generated id.
    pub fn index_and_commit(&self, record: impl Into<Record>) -> Option<String> {
        let encoded = self
            .indexer
            .index_record(&record.into())
            .expect("Failed to index record");
        self.indexer.commit().expect("Failed to commit");
        encoded
            .as_document()
            .and_then(|doc| doc.id())
            .map(str::to_string)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Route tracing output through the test writer. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn base_instant() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(BASE_TS_MS).unwrap()
}

/// Page with every optional field set.
pub fn sample_page(lru: &str) -> PageItem {
    let mut page = PageItem::new(lru)
        .with_url("https://www.sciencespo.fr/")
        .with_source("CRAWL")
        .with_source("LINK")
        .with_tag("meta", "lang", "en")
        .with_tag("meta", "lang", "fr")
        .with_tag("user", "topic", "politics")
        .with_creation_date(base_instant());
    page.crawler_timestamp = Some(BASE_TS_MS.to_string());
    page.depth = 2;
    page.error_code = Some("none".to_string());
    page.http_status_code = 200;
    page.is_node = true;
    page
}

/// Web entity with every optional field set.
pub fn sample_entity(id: &str, lru: &str) -> WebEntity {
    WebEntity::new(format!("Entity {id}"))
        .with_id(id)
        .with_lru(lru)
        .with_status("IN")
        .with_homepage("https://www.sciencespo.fr/")
        .with_startpage("https://www.sciencespo.fr/")
        .with_startpage("https://www.sciencespo.fr/recherche")
        .with_tag("core", "category", "university")
        .with_creation_date(base_instant())
}

/// Small crawl graph: two sites, their links, and three records that the
/// codec refuses.
pub fn crawl_graph() -> Vec<Record> {
    let home = "s:https|h:fr|h:sciencespo|h:www|";
    let research = "s:https|h:fr|h:sciencespo|h:www|p:recherche|";
    let outside = "s:http|h:org|h:wikipedia|h:fr|";

    vec![
        sample_page(home).into(),
        PageItem::new(research).with_source("CRAWL").into(),
        PageItem::new(outside).with_source("LINK").into(),
        NodeLink::new(home, research, 3).into(),
        NodeLink::new(research, outside, 1).into(),
        sample_entity("sciencespo", home).into(),
        WebEntity::new("Wikipedia FR")
            .with_id("wikipedia")
            .with_lru(outside)
            .into(),
        WebEntityLink::new("sciencespo", "wikipedia", 1).into(),
        WebEntityNodeLink::new("sciencespo", outside, 1).into(),
        WebEntityCreationRule::default_rule("(s:[a-zA-Z]+\\|(h:[^|]+\\|)+)").into(),
        PrecisionException::new(research).into(),
        // Refused: no LRU, no target, no source.
        PageItem::default().into(),
        NodeLink::new(home, "", 1).into(),
        WebEntityLink::new("", "wikipedia", 1).into(),
    ]
}
