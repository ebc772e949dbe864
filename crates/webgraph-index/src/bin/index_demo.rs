//! Indexes a small crawl graph and reads it back.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use webgraph_index::{GraphIndexConfig, GraphIndexer, GraphReader, TantivyStore};
use webgraph_types::{
    NodeLink, PageItem, PrecisionException, Record, RecordKind, Settings, WebEntity,
    WebEntityCreationRule, WebEntityLink, WebEntityNodeLink,
};

/// Graph index demo
#[derive(Parser, Debug)]
#[command(name = "index-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (overrides default ~/.config/webgraph-memory/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override index directory
    #[arg(short, long)]
    index_path: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(path) = cli.index_path {
        settings.index_path = path;
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = GraphIndexConfig::from_settings(&settings);
    info!(path = ?config.index_path, "Opening graph store");
    let store = Arc::new(TantivyStore::open(config).context("Failed to open graph store")?);

    let indexer = GraphIndexer::new(store.clone());
    let stats = indexer.index_records(&sample_graph())?;
    indexer.commit()?;
    info!(written = stats.written, refused = stats.refused, "Sample graph indexed");

    let reader = GraphReader::new(store);
    for kind in RecordKind::ALL {
        let records = reader.records_of_kind(kind)?;
        println!("{:<24} {}", kind.as_str(), records.len());
    }

    Ok(())
}

fn sample_graph() -> Vec<Record> {
    let home = "s:https|h:org|h:example|";
    let about = "s:https|h:org|h:example|p:about|";
    let outside = "s:http|h:net|h:elsewhere|";

    vec![
        PageItem::new(home)
            .with_source("CRAWL")
            .with_tag("meta", "lang", "en")
            .into(),
        PageItem::new(about).with_source("CRAWL").into(),
        PageItem::new(outside).with_source("LINK").into(),
        NodeLink::new(home, about, 1).into(),
        NodeLink::new(about, outside, 2).into(),
        WebEntity::new("Example")
            .with_id("example")
            .with_lru(home)
            .with_status("in")
            .with_homepage("https://example.org/")
            .into(),
        WebEntity::new("Elsewhere")
            .with_id("elsewhere")
            .with_lru(outside)
            .into(),
        WebEntityLink::new("example", "elsewhere", 2).into(),
        WebEntityNodeLink::new("example", outside, 1).into(),
        WebEntityCreationRule::default_rule("(s:[a-zA-Z]+\\|(h:[^|]+\\|)+)").into(),
        PrecisionException::new(about).into(),
        // Missing target: refused and counted.
        NodeLink::new(home, "", 1).into(),
    ]
}
