// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// semsearch - In-memory semantic document search
///
/// Indexes a JSON corpus with an embedding model and ranks documents by
/// cosine similarity to a natural-language query.
#[derive(Parser, Debug)]
#[command(name = "semsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank corpus documents by similarity to a query
    #[command(alias = "s")]
    Search {
        /// Search query (natural language)
        query: String,

        /// JSON corpus file to index
        #[arg(short, long)]
        corpus: PathBuf,

        /// Maximum number of results
        #[arg(short = 'm', long = "limit", visible_alias = "top-k")]
        limit: Option<usize>,

        /// Drop results whose similarity is below this value
        #[arg(long, allow_negative_numbers = true)]
        min_similarity: Option<f32>,
    },

    /// Show one indexed document
    Show {
        /// Document id
        id: String,

        /// JSON corpus file to index
        #[arg(short, long)]
        corpus: PathBuf,
    },

    /// Print index statistics
    Stats {
        /// JSON corpus file to index
        #[arg(short, long)]
        corpus: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
