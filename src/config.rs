// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for semsearch
//!
//! Loads configuration from .semsearchrc.toml in a directory or ~/.config/semsearch/config.toml

use serde::Deserialize;
use std::path::Path;

use crate::embedding::DEFAULT_EMBEDDING_DIM;

/// Name of the per-directory configuration file
pub const CONFIG_FILE: &str = ".semsearchrc.toml";

/// Embedding provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    #[default]
    Builtin,
    Command,
    Dummy,
}

/// What the store does when a document id is indexed twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the earlier record entirely, re-embedding it
    #[default]
    Replace,
    /// Fail with `DuplicateId` and keep the earlier record
    Reject,
}

/// Search configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of results returned when the caller does not ask for a limit
    pub top_k: Option<usize>,
    /// Results below this similarity are dropped (unset keeps everything)
    pub min_similarity: Option<f32>,
}

impl SearchConfig {
    /// Get default top_k (defaults to 5)
    pub fn top_k(&self) -> usize {
        self.top_k.unwrap_or(5)
    }

    /// Get default similarity threshold (defaults to none)
    pub fn min_similarity(&self) -> Option<f32> {
        self.min_similarity
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider type (builtin, command, dummy)
    pub provider: Option<EmbeddingProviderType>,
    /// Model identifier for the command provider
    pub model: Option<String>,
    /// Command to execute for command provider
    pub command: Option<String>,
    /// Embedding dimension the engine is built with
    pub dimension: Option<usize>,
    /// Maximum characters passed to the builtin model per text
    pub max_chars: Option<usize>,
    /// L2-normalize builtin embeddings
    pub normalize: Option<bool>,
}

impl EmbeddingConfig {
    /// Get provider type (defaults to Builtin)
    pub fn provider(&self) -> EmbeddingProviderType {
        self.provider.unwrap_or_default()
    }

    /// Get model identifier (defaults to "command")
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or("command")
    }

    /// Get command (defaults to "embedder")
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or("embedder")
    }

    /// Get dimension (defaults to 384, the builtin model's size)
    pub fn dimension(&self) -> usize {
        self.dimension.unwrap_or(DEFAULT_EMBEDDING_DIM)
    }

    /// Get max chars (defaults to 2000)
    pub fn max_chars(&self) -> usize {
        self.max_chars.unwrap_or(2000)
    }

    /// Get normalize flag (defaults to true)
    pub fn normalize(&self) -> bool {
        self.normalize.unwrap_or(true)
    }
}

/// Document store configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Duplicate id handling (replace, reject)
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl StoreConfig {
    /// Get duplicate policy (defaults to Replace)
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy.unwrap_or_default()
    }
}

/// Configuration loaded from .semsearchrc.toml or ~/.config/semsearch/config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search configuration
    pub search: SearchConfig,

    /// Embedding configuration
    pub embeddings: EmbeddingConfig,

    /// Store configuration
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration relative to the current directory
    pub fn load() -> Self {
        match std::env::current_dir() {
            Ok(dir) => Self::load_for_dir(dir),
            Err(_) => Self::load_global().unwrap_or_default(),
        }
    }

    /// Load configuration for a directory
    ///
    /// Precedence (highest to lowest):
    /// 1. .semsearchrc.toml in `dir`
    /// 2. ~/.config/semsearch/config.toml
    pub fn load_for_dir(dir: impl AsRef<Path>) -> Self {
        if let Some(config) = Self::load_from_path(&dir.as_ref().join(CONFIG_FILE)) {
            return config;
        }

        Self::load_global().unwrap_or_default()
    }

    fn load_global() -> Option<Self> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("semsearch").join("config.toml");
        Self::load_from_path(&config_path)
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge CLI limit with config (CLI wins)
    pub fn merge_top_k(&self, cli_value: Option<usize>) -> usize {
        cli_value.unwrap_or_else(|| self.search.top_k())
    }

    /// Merge CLI threshold with config (CLI wins)
    pub fn merge_min_similarity(&self, cli_value: Option<f32>) -> Option<f32> {
        cli_value.or(self.search.min_similarity())
    }

    /// Get the search configuration
    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    /// Get the embedding configuration
    pub fn embeddings(&self) -> &EmbeddingConfig {
        &self.embeddings
    }

    /// Get the store configuration
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }
}
