// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store.
//!
//! Owns every indexed [`Document`] for the lifetime of the engine. Records are
//! keyed by id and kept in insertion order; that order is what search uses to
//! break similarity ties.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::config::DuplicatePolicy;
use crate::document::{Document, NewDocument};
use crate::embedding::{embed_checked, EmbeddingProvider};
use crate::errors::{Result, SearchError};

/// Insertion-ordered collection of documents and their embeddings.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Length every stored embedding must have
    dimension: usize,
    policy: DuplicatePolicy,
    documents: IndexMap<String, Arc<Document>>,
}

impl DocumentStore {
    /// Create an empty store that replaces documents on duplicate ids.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_policy(dimension, DuplicatePolicy::default())
    }

    /// Create an empty store with an explicit duplicate-id policy.
    pub fn with_policy(dimension: usize, policy: DuplicatePolicy) -> Result<Self> {
        if dimension == 0 {
            return Err(SearchError::InvalidDimension(dimension));
        }

        Ok(Self {
            dimension,
            policy,
            documents: IndexMap::new(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Embeds `"{title}. {content}"` with `provider` and records the document.
    ///
    /// The provider is called exactly once per accepted insert. Under
    /// [`DuplicatePolicy::Reject`] a known id fails before the provider is
    /// called. On any error the store is left untouched.
    pub fn insert(
        &mut self,
        provider: &mut dyn EmbeddingProvider,
        input: NewDocument,
    ) -> Result<Option<Arc<Document>>> {
        self.check_insertable(&input.id)?;
        let embedding = embed_checked(provider, &input.embedding_text(), self.dimension)?;
        self.insert_document(Document::from_input(input, embedding))
    }

    /// Records an already-embedded document.
    ///
    /// Returns the record it replaced, if any. A replaced record keeps its
    /// original position in insertion order.
    pub fn insert_document(&mut self, document: Document) -> Result<Option<Arc<Document>>> {
        if document.embedding.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: document.embedding.len(),
            });
        }
        if let Some(pos) = document.embedding.iter().position(|v| !v.is_finite()) {
            return Err(SearchError::EmbeddingUnavailable(format!(
                "embedding for '{}' has a non-finite component at index {}",
                document.id, pos
            )));
        }
        self.check_insertable(&document.id)?;

        Ok(self
            .documents
            .insert(document.id.clone(), Arc::new(document)))
    }

    /// Fails with `DuplicateId` if `id` is known and duplicates are rejected.
    pub fn check_insertable(&self, id: &str) -> Result<()> {
        if self.policy == DuplicatePolicy::Reject && self.documents.contains_key(id) {
            return Err(SearchError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Result<&Arc<Document>> {
        self.documents
            .get(id)
            .ok_or_else(|| SearchError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// All documents in insertion order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Arc<Document>> + '_ {
        self.documents.values()
    }

    /// Remove a document, keeping the order of the others.
    pub fn remove(&mut self, id: &str) -> Result<Arc<Document>> {
        self.documents
            .shift_remove(id)
            .ok_or_else(|| SearchError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MetadataValue;
    use crate::embedding::DummyProvider;

    fn doc(id: &str, content: &str, embedding: Vec<f32>) -> Document {
        Document::from_input(NewDocument::new(id, "Title", content), embedding)
    }

    fn ids(store: &DocumentStore) -> Vec<String> {
        store.all().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            DocumentStore::new(0).unwrap_err(),
            SearchError::InvalidDimension(0)
        );
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = DocumentStore::new(4).unwrap();
        let mut provider = DummyProvider::new(4);

        let input = NewDocument::new("d1", "Plant Biology", "How plants use sunlight")
            .with_metadata("category", "science");
        store.insert(&mut provider, input).unwrap();

        let stored = store.get("d1").unwrap();
        assert_eq!(stored.title, "Plant Biology");
        assert_eq!(stored.embedding.len(), 4);
        assert_eq!(stored.word_count, 4);
        assert_eq!(stored.metadata["category"], MetadataValue::from("science"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_non_finite_embedding_rejected() {
        let mut store = DocumentStore::new(2).unwrap();
        let err = store
            .insert_document(doc("bad", "c", vec![f32::NAN, 1.0]))
            .unwrap_err();
        assert!(matches!(err, SearchError::EmbeddingUnavailable(_)));
        assert!(store.is_empty());

        store
            .insert_document(doc("big", "c", vec![1e20, f32::MAX]))
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = DocumentStore::new(2).unwrap();
        assert_eq!(
            store.get("missing").unwrap_err(),
            SearchError::NotFound("missing".to_string())
        );
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut store = DocumentStore::new(2).unwrap();
        for id in ["zeta", "alpha", "mid"] {
            store.insert_document(doc(id, "c", vec![1.0, 0.0])).unwrap();
        }
        assert_eq!(ids(&store), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = DocumentStore::new(2).unwrap();
        for id in ["a", "b", "c", "d"] {
            store.insert_document(doc(id, "c", vec![0.0, 1.0])).unwrap();
        }

        let removed = store.remove("b").unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(ids(&store), vec!["a", "c", "d"]);
        assert_eq!(store.len(), 3);

        assert_eq!(
            store.remove("b").unwrap_err(),
            SearchError::NotFound("b".to_string())
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_replace_policy_overwrites_in_place() {
        let mut store = DocumentStore::new(2).unwrap();
        store.insert_document(doc("x", "first", vec![1.0, 0.0])).unwrap();
        store.insert_document(doc("y", "other", vec![1.0, 0.0])).unwrap();

        let replaced = store
            .insert_document(doc("x", "second", vec![0.0, 1.0]))
            .unwrap();

        assert_eq!(replaced.unwrap().content, "first");
        assert_eq!(store.len(), 2);
        let current = store.get("x").unwrap();
        assert_eq!(current.content, "second");
        assert_eq!(current.embedding, vec![0.0, 1.0]);
        assert_eq!(ids(&store), vec!["x", "y"]);
    }

    #[test]
    fn test_reject_policy_keeps_original() {
        let mut store = DocumentStore::with_policy(2, DuplicatePolicy::Reject).unwrap();
        store.insert_document(doc("x", "first", vec![1.0, 0.0])).unwrap();

        let err = store
            .insert_document(doc("x", "second", vec![0.0, 1.0]))
            .unwrap_err();

        assert_eq!(err, SearchError::DuplicateId("x".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("x").unwrap().content, "first");
    }

    #[test]
    fn test_wrong_dimension_leaves_store_untouched() {
        let mut store = DocumentStore::new(3).unwrap();
        let mut provider = DummyProvider::new(2);

        let err = store
            .insert(&mut provider, NewDocument::new("d1", "t", "c"))
            .unwrap_err();

        assert_eq!(
            err,
            SearchError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(store.is_empty());
    }
}
