// SPDX-License-Identifier: MIT OR Apache-2.0

//! The provider seam between the engine and an embedding model.

use anyhow::Result;

use crate::config::{EmbeddingConfig, EmbeddingProviderType};
use crate::errors::SearchError;

use super::command::CommandProvider;

/// Embedding dimension of sentence-transformers/all-MiniLM-L6-v2.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Turns text into fixed-length vectors.
///
/// Providers are handed to the engine at construction; the engine holds one
/// exclusively and calls it with `&mut self`.
pub trait EmbeddingProvider: Send {
    /// Identifier of the model behind this provider.
    fn model_id(&self) -> &str;

    /// Preferred number of texts per call.
    fn batch_size(&self) -> usize;

    /// One vector per input text, in input order.
    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn embed_one(&mut self, text: &str) -> Result<Vec<f32>> {
        self.embed_texts(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Provider '{}' returned no vector", self.model_id()))
    }
}

/// Embeds `text` and checks the vector is usable by an engine of `dimension`.
///
/// Provider failures and non-finite components become
/// [`SearchError::EmbeddingUnavailable`]; a wrong length becomes
/// [`SearchError::DimensionMismatch`].
pub fn embed_checked(
    provider: &mut dyn EmbeddingProvider,
    text: &str,
    dimension: usize,
) -> crate::errors::Result<Vec<f32>> {
    let embedding = provider
        .embed_one(text)
        .map_err(|e| SearchError::EmbeddingUnavailable(format!("{:#}", e)))?;

    if embedding.len() != dimension {
        return Err(SearchError::DimensionMismatch {
            expected: dimension,
            actual: embedding.len(),
        });
    }
    if let Some(pos) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(SearchError::EmbeddingUnavailable(format!(
            "provider '{}' returned a non-finite component at index {}",
            provider.model_id(),
            pos
        )));
    }

    Ok(embedding)
}

/// Builds the provider selected by configuration.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    let provider: Box<dyn EmbeddingProvider> = match config.provider() {
        EmbeddingProviderType::Builtin => builtin(config)?,
        EmbeddingProviderType::Command => Box::new(CommandProvider::new(
            config.command().to_string(),
            config.model().to_string(),
        )),
        EmbeddingProviderType::Dummy => Box::new(DummyProvider::new(config.dimension())),
    };
    tracing::debug!(model = provider.model_id(), "embedding provider ready");
    Ok(provider)
}

#[cfg(not(all(target_os = "macos", target_arch = "x86_64")))]
fn builtin(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    use super::builtin::{BuiltinOptions, FastEmbedder};

    let options = BuiltinOptions {
        max_chars: config.max_chars(),
        normalize: config.normalize(),
        ..BuiltinOptions::default()
    };
    Ok(Box::new(FastEmbedder::new(options.with_env_overrides()?)?))
}

#[cfg(all(target_os = "macos", target_arch = "x86_64"))]
fn builtin(_config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    anyhow::bail!(
        "The builtin embedding provider is not available on this platform; use provider = \"command\""
    )
}

/// Returns zero vectors of a fixed dimension.
///
/// Every similarity against a zero vector is 0.0, so results come back in
/// insertion order.
#[derive(Debug, Clone)]
pub struct DummyProvider {
    dimension: usize,
}

impl DummyProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl EmbeddingProvider for DummyProvider {
    fn model_id(&self) -> &str {
        "dummy"
    }

    fn batch_size(&self) -> usize {
        usize::MAX
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; self.dimension]; texts.len()])
    }
}
