// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic search engine.
//!
//! Binds an [`EmbeddingProvider`] to a [`DocumentStore`] and exposes the
//! query surface: insert, search, get, remove, all, len, stats.
//!
//! The store sits behind a read-write lock. Embeddings are computed before the
//! write lock is taken, so readers only ever see a store before or after a
//! mutation.

use anyhow::Context;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::{Config, DuplicatePolicy};
use crate::document::{Document, Metadata, NewDocument, SearchResult};
use crate::embedding::{create_provider, embed_checked, EmbeddingProvider};
use crate::errors::Result;
use crate::search;
use crate::store::DocumentStore;

/// Summary of what the engine currently holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub total_documents: usize,
    /// Sum of per-document content word counts
    pub total_words: usize,
    pub model_id: String,
    pub vector_dimensions: usize,
    /// Text plus embedding bytes; excludes map and allocator overhead
    pub approx_size_bytes: usize,
}

/// In-memory semantic search over embedded documents.
pub struct SearchEngine {
    provider: Mutex<Box<dyn EmbeddingProvider>>,
    store: RwLock<DocumentStore>,
    model_id: String,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read();
        f.debug_struct("SearchEngine")
            .field("model_id", &self.model_id)
            .field("dimension", &store.dimension())
            .field("documents", &store.len())
            .field("policy", &store.policy())
            .finish()
    }
}

impl SearchEngine {
    /// Create an engine whose store replaces documents on duplicate ids.
    pub fn new(provider: Box<dyn EmbeddingProvider>, dimension: usize) -> Result<Self> {
        Self::with_policy(provider, dimension, DuplicatePolicy::default())
    }

    /// Create an engine with an explicit duplicate-id policy.
    pub fn with_policy(
        provider: Box<dyn EmbeddingProvider>,
        dimension: usize,
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        let store = DocumentStore::with_policy(dimension, policy)?;
        let model_id = provider.model_id().to_string();

        Ok(Self {
            provider: Mutex::new(provider),
            store: RwLock::new(store),
            model_id,
        })
    }

    /// Build provider, dimension and policy from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider =
            create_provider(config.embeddings()).context("Failed to create embedding provider")?;
        let engine = Self::with_policy(
            provider,
            config.embeddings().dimension(),
            config.store().duplicate_policy(),
        )?;
        Ok(engine)
    }

    pub fn dimension(&self) -> usize {
        self.store.read().dimension()
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Index a document built from its parts.
    pub fn insert(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> Result<()> {
        let mut input = NewDocument::new(id, title, content);
        input.metadata = metadata;
        self.insert_document(input)
    }

    /// Index a document.
    ///
    /// Embeds `"{title}. {content}"` once, then records it under the
    /// store's duplicate policy. Fails without touching the store.
    pub fn insert_document(&self, input: NewDocument) -> Result<()> {
        let dimension = {
            let store = self.store.read();
            store.check_insertable(&input.id)?;
            store.dimension()
        };

        let embedding = {
            let mut provider = self.provider.lock();
            embed_checked(provider.as_mut(), &input.embedding_text(), dimension)?
        };

        let document = Document::from_input(input, embedding);
        let id = document.id.clone();
        let replaced = self.store.write().insert_document(document)?;

        if replaced.is_some() {
            debug!(id = %id, "replaced document");
        } else {
            trace!(id = %id, "indexed document");
        }
        Ok(())
    }

    /// Index several documents in order, stopping at the first failure.
    ///
    /// Documents indexed before the failure stay indexed.
    pub fn insert_all<I>(&self, inputs: I) -> Result<usize>
    where
        I: IntoIterator<Item = NewDocument>,
    {
        let mut count = 0;
        for input in inputs {
            self.insert_document(input)?;
            count += 1;
        }
        debug!(count, "indexed documents");
        Ok(count)
    }

    /// Rank stored documents by cosine similarity to `query`.
    ///
    /// Results are sorted by descending similarity; equal similarities keep
    /// insertion order. At most `top_k` results are returned, each with
    /// `similarity >= min_similarity` when a threshold is given.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        min_similarity: Option<f32>,
    ) -> Result<Vec<SearchResult>> {
        search::validate_request(query, top_k)?;

        let dimension = self.dimension();
        let query_embedding = {
            let mut provider = self.provider.lock();
            embed_checked(provider.as_mut(), query, dimension)?
        };

        let store = self.store.read();
        let results = search::rank(&store, &query_embedding, top_k, min_similarity)?;

        debug!(
            candidates = store.len(),
            returned = results.len(),
            top_k,
            min_similarity = ?min_similarity,
            "search complete"
        );
        Ok(results)
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Result<Arc<Document>> {
        self.store.read().get(id).map(Arc::clone)
    }

    /// Remove a document by id.
    pub fn remove(&self, id: &str) -> Result<Arc<Document>> {
        let removed = self.store.write().remove(id)?;
        debug!(id = %id, "removed document");
        Ok(removed)
    }

    /// Snapshot of all documents in insertion order.
    pub fn all(&self) -> Vec<Arc<Document>> {
        self.store.read().all().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn stats(&self) -> EngineStats {
        let store = self.store.read();
        EngineStats {
            total_documents: store.len(),
            total_words: store.all().map(|d| d.word_count).sum(),
            model_id: self.model_id.clone(),
            vector_dimensions: store.dimension(),
            approx_size_bytes: store.all().map(|d| d.approx_size_bytes()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::DummyProvider;
    use crate::errors::SearchError;

    fn dummy_engine(dimension: usize) -> SearchEngine {
        SearchEngine::new(Box::new(DummyProvider::new(dimension)), dimension).unwrap()
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = SearchEngine::new(Box::new(DummyProvider::new(0)), 0).unwrap_err();
        assert_eq!(err, SearchError::InvalidDimension(0));
    }

    #[test]
    fn validation_happens_before_embedding() {
        // A provider with the wrong dimension would fail if it were called.
        let engine = SearchEngine::new(Box::new(DummyProvider::new(3)), 4).unwrap();
        assert_eq!(
            engine.search("   ", 3, None).unwrap_err(),
            SearchError::EmptyQuery
        );
        assert_eq!(
            engine.search("query", 0, None).unwrap_err(),
            SearchError::InvalidTopK(0)
        );
    }

    #[test]
    fn stats_reflect_store() {
        let engine = dummy_engine(4);
        engine
            .insert("a", "One", "two words", Metadata::new())
            .unwrap();
        engine
            .insert("b", "Two", "three more words", Metadata::new())
            .unwrap();

        let stats = engine.stats();
        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.model_id, "dummy");
        assert_eq!(stats.vector_dimensions, 4);
        assert!(stats.approx_size_bytes >= 2 * 4 * 4);
    }

    #[test]
    fn dummy_embeddings_rank_in_insertion_order() {
        let engine = dummy_engine(8);
        for id in ["c", "a", "b"] {
            engine.insert(id, id, "text", Metadata::new()).unwrap();
        }

        let results = engine.search("anything", 2, None).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert!(results.iter().all(|r| r.similarity == 0.0));
    }
}
