// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query module - commands answered against an indexed corpus

pub mod search;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use semsearch::config::Config;
use semsearch::corpus;
use semsearch::SearchEngine;

/// Build an engine from the current configuration and index `corpus_path` into it.
pub(crate) fn load_engine(config: &Config, corpus_path: &Path) -> Result<SearchEngine> {
    let start = Instant::now();
    let engine = SearchEngine::from_config(config)?;
    let documents = corpus::load(corpus_path)?;
    let count = engine
        .insert_all(documents)
        .with_context(|| format!("Failed to index corpus: {}", corpus_path.display()))?;

    tracing::info!(
        documents = count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        corpus = %corpus_path.display(),
        "corpus indexed"
    );
    Ok(engine)
}
