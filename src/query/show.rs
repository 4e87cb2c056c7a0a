// SPDX-License-Identifier: MIT OR Apache-2.0

//! Show one indexed document

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use semsearch::config::Config;
use semsearch::output::{colorize_dim, colorize_id, colorize_title, use_colors};
use semsearch::Metadata;

/// Document view for JSON output; the embedding itself is omitted.
#[derive(Debug, Serialize)]
struct DocumentView<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
    metadata: &'a Metadata,
    word_count: usize,
    indexed_at: i64,
    dimensions: usize,
}

/// Run the show command
pub fn run(id: &str, corpus: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load();
    let engine = super::load_engine(&config, corpus)?;
    let doc = engine.get(id)?;

    match format {
        OutputFormat::Json => {
            let view = DocumentView {
                id: &doc.id,
                title: &doc.title,
                content: &doc.content,
                metadata: &doc.metadata,
                word_count: doc.word_count,
                indexed_at: doc.indexed_at,
                dimensions: doc.embedding.len(),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            let use_color = use_colors();
            println!(
                "{}  ({})",
                colorize_title(&doc.title, use_color),
                colorize_id(&doc.id, use_color)
            );
            println!("{}", doc.content);
            for (key, value) in &doc.metadata {
                let value = serde_json::to_string(value)?;
                println!("{}", colorize_dim(&format!("  {}: {}", key, value), use_color));
            }
            println!(
                "{}",
                colorize_dim(
                    &format!("  words: {}, dimensions: {}", doc.word_count, doc.embedding.len()),
                    use_color
                )
            );
        }
    }

    Ok(())
}
