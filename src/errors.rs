// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the document store and search engine.

use thiserror::Error;

/// Errors surfaced by the document store, the search engine and vector math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Two vectors (or a vector and the engine dimension) disagree in length.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A document with this id is already indexed and the store rejects duplicates.
    #[error("Document '{0}' is already indexed")]
    DuplicateId(String),

    /// No document with this id is indexed.
    #[error("Document '{0}' not found")]
    NotFound(String),

    /// The query was empty or whitespace-only.
    #[error("Search query is empty")]
    EmptyQuery,

    /// `top_k` must be at least 1.
    #[error("Invalid top_k {0}: must be at least 1")]
    InvalidTopK(usize),

    /// The embedding provider failed or returned an unusable vector.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Engines need a non-zero embedding dimension.
    #[error("Invalid embedding dimension {0}")]
    InvalidDimension(usize),
}

/// Result alias for store and engine operations.
pub type Result<T> = std::result::Result<T, SearchError>;
