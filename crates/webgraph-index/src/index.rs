//! Tantivy index management.
//!
//! Handles index creation, opening, and lifecycle.

use std::path::{Path, PathBuf};

use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};
use tracing::{debug, info};

use webgraph_types::Settings;

use crate::error::IndexError;
use crate::schema::{build_graph_schema, GraphSchema};

/// Default memory budget for IndexWriter (50MB)
const DEFAULT_WRITER_MEMORY_MB: usize = 50;

/// Graph index configuration
#[derive(Debug, Clone)]
pub struct GraphIndexConfig {
    /// Path to index directory
    pub index_path: PathBuf,
    /// Memory budget for writer in MB
    pub writer_memory_mb: usize,
}

impl Default for GraphIndexConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./graph-index"),
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
        }
    }
}

impl GraphIndexConfig {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            index_path: settings.expanded_index_path(),
            writer_memory_mb: settings.writer_memory_mb,
        }
    }

    pub fn with_memory_mb(mut self, mb: usize) -> Self {
        self.writer_memory_mb = mb;
        self
    }
}

/// Wrapper for Tantivy index with schema access.
pub struct GraphIndex {
    index: Index,
    schema: GraphSchema,
    writer_memory_mb: usize,
    path: Option<PathBuf>,
}

impl GraphIndex {
    /// Open existing index or create new one.
    pub fn open_or_create(config: GraphIndexConfig) -> Result<Self, IndexError> {
        let index = open_or_create_index(&config.index_path)?;
        let schema = GraphSchema::from_schema(index.schema())?;

        info!(path = ?config.index_path, "Opened graph index");

        Ok(Self {
            index,
            schema,
            writer_memory_mb: config.writer_memory_mb,
            path: Some(config.index_path),
        })
    }

    /// Create a throwaway index held in RAM.
    pub fn in_memory() -> Self {
        let schema = build_graph_schema();
        let index = Index::create_in_ram(schema.schema().clone());
        debug!("Created in-memory graph index");

        Self {
            index,
            schema,
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
            path: None,
        }
    }

    /// Get the graph schema
    pub fn schema(&self) -> &GraphSchema {
        &self.schema
    }

    /// Get the underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Create an IndexWriter with configured memory budget
    pub fn writer(&self) -> Result<IndexWriter, IndexError> {
        let memory_budget = self.writer_memory_mb * 1024 * 1024;
        let writer = self.index.writer(memory_budget)?;
        debug!(memory_mb = self.writer_memory_mb, "Created index writer");
        Ok(writer)
    }

    /// Create an IndexReader that only reloads when asked to.
    pub fn reader(&self) -> Result<IndexReader, IndexError> {
        let reader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        debug!("Created index reader");
        Ok(reader)
    }

    /// Index directory, or None for an in-memory index
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Open an existing index or create a new one.
///
/// Uses MmapDirectory for persistence.
pub fn open_or_create_index(path: &Path) -> Result<Index, IndexError> {
    if path.join("meta.json").exists() {
        debug!(path = ?path, "Opening existing index");
        let index = Index::open_in_dir(path)?;
        Ok(index)
    } else {
        info!(path = ?path, "Creating new index");
        std::fs::create_dir_all(path)?;
        let schema = build_graph_schema();
        let index = Index::create_in_dir(path, schema.schema().clone())?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_new_index() {
        let temp_dir = TempDir::new().unwrap();
        let config = GraphIndexConfig::new(temp_dir.path());

        let index = GraphIndex::open_or_create(config).unwrap();
        assert!(temp_dir.path().join("meta.json").exists());
        assert_eq!(index.path(), Some(temp_dir.path()));
    }

    #[test]
    fn test_reopen_existing_index() {
        let temp_dir = TempDir::new().unwrap();
        let config = GraphIndexConfig::new(temp_dir.path());

        let _index1 = GraphIndex::open_or_create(config.clone()).unwrap();
        let index2 = GraphIndex::open_or_create(config).unwrap();
        assert!(index2.path().is_some());
    }

    #[test]
    fn test_create_writer_and_reader() {
        let index = GraphIndex::in_memory();
        let _writer = index.writer().unwrap();
        let _reader = index.reader().unwrap();
        assert!(index.path().is_none());
    }

    #[test]
    fn test_config_default() {
        let config = GraphIndexConfig::default();
        assert_eq!(config.index_path, PathBuf::from("./graph-index"));
        assert_eq!(config.writer_memory_mb, DEFAULT_WRITER_MEMORY_MB);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = Settings {
            index_path: "/tmp/graph".to_string(),
            writer_memory_mb: 100,
            log_level: "debug".to_string(),
        };
        let config = GraphIndexConfig::from_settings(&settings);
        assert_eq!(config.index_path, PathBuf::from("/tmp/graph"));
        assert_eq!(config.writer_memory_mb, 100);

        let config = GraphIndexConfig::new("/tmp/test").with_memory_mb(64);
        assert_eq!(config.writer_memory_mb, 64);
    }
}
