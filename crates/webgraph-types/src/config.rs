//! Configuration loading for webgraph-memory.
//!
//! Layered config: defaults -> config file -> env vars -> caller overrides.
//! The default config file lives at ~/.config/webgraph-memory/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GraphError;

/// Main application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the inverted-index directory holding graph documents
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Memory budget for the index writer, in MB
    #[serde(default = "default_writer_memory_mb")]
    pub writer_memory_mb: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_index_path() -> String {
    ProjectDirs::from("", "", "webgraph-memory")
        .map(|p| p.data_local_dir().join("graph-index"))
        .unwrap_or_else(|| PathBuf::from("./graph-index"))
        .to_string_lossy()
        .to_string()
}

fn default_writer_memory_mb() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            writer_memory_mb: default_writer_memory_mb(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/webgraph-memory/config.toml)
    /// 3. Caller-specified config file (optional)
    /// 4. Environment variables (WEBGRAPH_*)
    pub fn load(config_path: Option<&str>) -> Result<Self, GraphError> {
        let config_dir = ProjectDirs::from("", "", "webgraph-memory")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::load_layered(&config_dir.join("config"), config_path, "WEBGRAPH")
    }

    /// Layered load with the user config file and environment prefix given.
    fn load_layered(
        default_config_path: &Path,
        config_path: Option<&str>,
        env_prefix: &str,
    ) -> Result<Self, GraphError> {
        let mut builder = Config::builder()
            .set_default("index_path", default_index_path())
            .map_err(|e| GraphError::Config(e.to_string()))?
            .set_default("writer_memory_mb", default_writer_memory_mb() as i64)
            .map_err(|e| GraphError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| GraphError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // WEBGRAPH_INDEX_PATH, WEBGRAPH_LOG_LEVEL, ...
        builder = builder.add_source(Environment::with_prefix(env_prefix).try_parsing(true));

        let config = builder
            .build()
            .map_err(|e| GraphError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| GraphError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.index_path.trim().is_empty() {
            return Err(GraphError::Config("index_path must not be empty".into()));
        }
        if self.writer_memory_mb < 15 {
            return Err(GraphError::Config(format!(
                "writer_memory_mb must be >= 15, got {}",
                self.writer_memory_mb
            )));
        }
        Ok(())
    }

    /// Index path as a filesystem path, with a leading ~/ expanded.
    pub fn expanded_index_path(&self) -> PathBuf {
        if let Some(rest) = self.index_path.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return PathBuf::from(home).join(rest);
            }
        }
        PathBuf::from(&self.index_path)
    }
}
