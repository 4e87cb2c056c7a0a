// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use semsearch::{EmbeddingProvider, SearchEngine};

/// Provider returning canned vectors keyed by the exact text it is asked to embed.
pub struct StubProvider {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Option<Vec<f32>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

/// Handles for observing and steering a [`StubProvider`] after it moves into an engine.
#[derive(Clone)]
pub struct StubHandle {
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl StubHandle {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            vectors: HashMap::new(),
            fallback: None,
            calls: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with(mut self, text: &str, vector: &[f32]) -> Self {
        self.vectors.insert(text.to_string(), vector.to_vec());
        self
    }

    pub fn with_fallback(mut self, vector: &[f32]) -> Self {
        self.fallback = Some(vector.to_vec());
        self
    }

    pub fn handle(&self) -> StubHandle {
        StubHandle {
            calls: Arc::clone(&self.calls),
            failing: Arc::clone(&self.failing),
        }
    }
}

impl EmbeddingProvider for StubProvider {
    fn model_id(&self) -> &str {
        "stub"
    }

    fn batch_size(&self) -> usize {
        16
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            bail!("stub provider offline");
        }
        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .or(self.fallback.as_ref())
                    .cloned()
                    .ok_or_else(|| anyhow!("no stub vector for {:?}", text))
            })
            .collect()
    }
}

/// Text embedded for a document inserted by [`insert_doc`].
pub fn doc_text(id: &str) -> String {
    format!("{}. body of {}", id, id)
}

/// Insert a document titled `id` whose embedding text is [`doc_text`].
pub fn insert_doc(engine: &SearchEngine, id: &str) -> semsearch::Result<()> {
    engine.insert(id, id, format!("body of {}", id), Default::default())
}

/// Engine holding `docs` in order, answering `query` with `query_vector`.
pub fn engine_with(
    dimension: usize,
    docs: &[(&str, &[f32])],
    query: &str,
    query_vector: &[f32],
) -> (SearchEngine, StubHandle) {
    let mut provider = StubProvider::new().with(query, query_vector);
    for (id, vector) in docs {
        provider = provider.with(&doc_text(id), vector);
    }
    let handle = provider.handle();
    let engine = SearchEngine::new(Box::new(provider), dimension).expect("engine");
    for (id, _) in docs {
        insert_doc(&engine, id).expect("insert");
    }
    (engine, handle)
}
