// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index statistics

use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use semsearch::config::Config;

/// Run the stats command
pub fn run(corpus: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load();
    let engine = super::load_engine(&config, corpus)?;
    let stats = engine.stats();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Documents:  {}", stats.total_documents);
            println!("Words:      {}", stats.total_words);
            println!("Model:      {}", stats.model_id);
            println!("Dimensions: {}", stats.vector_dimensions);
            println!("Size:       ~{:.1} KiB", stats.approx_size_bytes as f64 / 1024.0);
        }
    }

    Ok(())
}
