// SPDX-License-Identifier: MIT OR Apache-2.0

//! semsearch - In-memory semantic document search library
//!
//! Documents are embedded once at insertion and ranked by cosine similarity
//! to the query embedding.

pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod errors;
pub mod output;
pub mod search;
pub mod store;
pub mod vector;

pub use config::{Config, DuplicatePolicy};
pub use document::{Document, Metadata, MetadataValue, NewDocument, SearchResult};
pub use embedding::EmbeddingProvider;
pub use engine::{EngineStats, SearchEngine};
pub use errors::{Result, SearchError};
pub use store::DocumentStore;
