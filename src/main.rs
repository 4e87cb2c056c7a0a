// SPDX-License-Identifier: MIT OR Apache-2.0

//! semsearch - In-memory semantic document search
//!
//! Loads a JSON corpus into a [`semsearch::SearchEngine`] and answers one
//! command against it.

mod cli;
mod query;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing with SEMSEARCH_LOG env var (e.g., SEMSEARCH_LOG=debug semsearch search "query")
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SEMSEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Search {
            query,
            corpus,
            limit,
            min_similarity,
        } => {
            query::search::run(&query, &corpus, limit, min_similarity, format)?;
        }
        Commands::Show { id, corpus } => {
            query::show::run(&id, &corpus, format)?;
        }
        Commands::Stats { corpus } => {
            query::stats::run(&corpus, format)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "semsearch", &mut std::io::stdout());
        }
    }

    Ok(())
}
