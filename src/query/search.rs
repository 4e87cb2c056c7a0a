// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic search over a corpus

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use semsearch::config::Config;
use semsearch::output::{
    colorize_dim, colorize_id, colorize_rank, colorize_similarity, colorize_title, preview,
    use_colors,
};
use semsearch::{Metadata, SearchResult};

const PREVIEW_CHARS: usize = 150;

/// Search hit for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub rank: usize,
    pub id: &'a str,
    pub title: &'a str,
    pub similarity: f32,
    pub content: &'a str,
    pub metadata: &'a Metadata,
}

impl<'a> From<&'a SearchResult> for SearchHit<'a> {
    fn from(result: &'a SearchResult) -> Self {
        Self {
            rank: result.rank,
            id: &result.document.id,
            title: &result.document.title,
            similarity: result.similarity,
            content: &result.document.content,
            metadata: &result.document.metadata,
        }
    }
}

/// Run the search command
pub fn run(
    query: &str,
    corpus: &Path,
    limit: Option<usize>,
    min_similarity: Option<f32>,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load();
    let top_k = config.merge_top_k(limit);
    let min_similarity = config.merge_min_similarity(min_similarity);

    let engine = super::load_engine(&config, corpus)?;
    let results = engine.search(query, top_k, min_similarity)?;

    match format {
        OutputFormat::Json => {
            let hits: Vec<SearchHit<'_>> = results.iter().map(SearchHit::from).collect();
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        OutputFormat::Text => print_text(query, &results),
    }

    Ok(())
}

fn print_text(query: &str, results: &[SearchResult]) {
    let use_color = use_colors();

    if results.is_empty() {
        if use_color {
            println!("{} No results found for: {}", "✗".red(), query.yellow());
        } else {
            println!("No results found for: {}", query);
        }
        return;
    }

    if use_color {
        println!(
            "\n{} Found {} results for: {}\n",
            "✓".green(),
            results.len().to_string().cyan(),
            query.yellow()
        );
    } else {
        println!("\nFound {} results for: {}\n", results.len(), query);
    }

    for result in results {
        let doc = &result.document;
        println!(
            "{} {}  {}  ({})",
            colorize_rank(result.rank, use_color),
            colorize_similarity(result.similarity, use_color),
            colorize_title(&doc.title, use_color),
            colorize_id(&doc.id, use_color)
        );
        println!("    {}", preview(&doc.content, PREVIEW_CHARS));
        if !doc.metadata.is_empty() {
            let meta = serde_json::to_string(&doc.metadata).unwrap_or_default();
            println!("    {}", colorize_dim(&meta, use_color));
        }
        println!();
    }
}
