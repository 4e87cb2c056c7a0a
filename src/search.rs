// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact similarity ranking over a document store.
//!
//! Every stored document is scored against the query embedding (brute force,
//! O(N·D)), filtered by the similarity threshold, stably sorted by descending
//! similarity and cut to `top_k`. Equal similarities keep insertion order.

use std::sync::Arc;

use crate::document::SearchResult;
use crate::errors::{Result, SearchError};
use crate::store::DocumentStore;
use crate::vector::cosine_similarity;

/// Checks query text and result count before any embedding work is done.
pub fn validate_request(query: &str, top_k: usize) -> Result<()> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    if top_k < 1 {
        return Err(SearchError::InvalidTopK(top_k));
    }
    Ok(())
}

/// Ranks the documents of `store` against `query_embedding`.
///
/// Documents with `similarity < min_similarity` are dropped; a document exactly
/// at the threshold is kept. `None` (or NaN) disables the threshold.
pub fn rank(
    store: &DocumentStore,
    query_embedding: &[f32],
    top_k: usize,
    min_similarity: Option<f32>,
) -> Result<Vec<SearchResult>> {
    if top_k < 1 {
        return Err(SearchError::InvalidTopK(top_k));
    }
    if let Some(pos) = query_embedding.iter().position(|v| !v.is_finite()) {
        return Err(SearchError::EmbeddingUnavailable(format!(
            "query embedding has a non-finite component at index {}",
            pos
        )));
    }
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let threshold = min_similarity.filter(|t| !t.is_nan());

    let mut candidates = store
        .all()
        .map(|document| {
            cosine_similarity(query_embedding, &document.embedding)
                .map(|similarity| (document, similarity))
        })
        .filter(|scored| match (scored, threshold) {
            (Ok((_, similarity)), Some(min)) => *similarity >= min,
            _ => true,
        })
        .collect::<Result<Vec<_>>>()?;

    // Stored and query vectors are finite, so every score is a real number.
    // Vec::sort_by is stable: ties stay in store order.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(top_k);

    Ok(candidates
        .into_iter()
        .enumerate()
        .map(|(idx, (document, similarity))| SearchResult {
            document: Arc::clone(document),
            similarity,
            rank: idx + 1,
        })
        .collect())
}
