// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus files for the command-line tool.
//!
//! A corpus is a JSON array of `{ "id", "title", "content", "metadata"? }`
//! objects, indexed in file order.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::document::NewDocument;

/// Read a corpus file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<NewDocument>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus: {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid corpus: {}", path.display()))
}

/// Parse corpus JSON. Ids must be non-empty.
pub fn parse(json: &str) -> Result<Vec<NewDocument>> {
    let documents: Vec<NewDocument> =
        serde_json::from_str(json).context("Corpus must be a JSON array of documents")?;

    let mut seen = HashSet::new();
    for (idx, doc) in documents.iter().enumerate() {
        if doc.id.trim().is_empty() {
            bail!("Document #{} has an empty id", idx + 1);
        }
        if !seen.insert(doc.id.as_str()) {
            tracing::warn!(id = %doc.id, "corpus repeats document id");
        }
    }

    Ok(documents)
}
