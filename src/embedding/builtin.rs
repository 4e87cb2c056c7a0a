// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local sentence-transformers/all-MiniLM-L6-v2 through fastembed.

use anyhow::{anyhow, bail, Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::borrow::Cow;
use std::env;

use super::provider::EmbeddingProvider;
use crate::vector::magnitude;

const DEFAULT_BATCH_SIZE: usize = 256;
const MAX_BATCH_SIZE: usize = 1024;
const DEFAULT_MAX_CHARS: usize = 2000;

/// Accepted spellings of the one model the builtin provider ships.
const MODEL_ALIASES: &[&str] = &[
    "minilm",
    "all-minilm-l6-v2",
    "allminilm-l6-v2",
    "sentence-transformers/all-minilm-l6-v2",
];

/// Tuning for [`FastEmbedder`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinOptions {
    pub batch_size: usize,
    /// Texts are cut to this many characters before embedding
    pub max_chars: usize,
    /// L2-normalize output vectors
    pub normalize: bool,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_chars: DEFAULT_MAX_CHARS,
            normalize: true,
        }
    }
}

impl BuiltinOptions {
    /// Apply `FASTEMBED_MODEL`, `FASTEMBED_BATCH_SIZE`, `FASTEMBED_MAX_CHARS`
    /// and `FASTEMBED_NORMALIZE`.
    pub fn with_env_overrides(self) -> Result<Self> {
        let model = env_override("FASTEMBED_MODEL", None, |v| Some(Some(v.to_lowercase())))?;
        if let Some(model) = model {
            if !MODEL_ALIASES.contains(&model.as_str()) {
                bail!(
                    "Unsupported FASTEMBED_MODEL '{}'. Supported value: {}",
                    model,
                    MODEL_ALIASES[0]
                );
            }
        }

        let batch_size = match env_override("FASTEMBED_BATCH_SIZE", self.batch_size, parse_usize)? {
            0 => DEFAULT_BATCH_SIZE,
            n if n > MAX_BATCH_SIZE => {
                tracing::warn!(requested = n, max = MAX_BATCH_SIZE, "clamping FASTEMBED_BATCH_SIZE");
                MAX_BATCH_SIZE
            }
            n => n,
        };
        let max_chars = match env_override("FASTEMBED_MAX_CHARS", self.max_chars, parse_usize)? {
            0 => DEFAULT_MAX_CHARS,
            n => n,
        };
        let normalize = env_override("FASTEMBED_NORMALIZE", self.normalize, parse_flag)?;

        Ok(Self {
            batch_size,
            max_chars,
            normalize,
        })
    }
}

/// fastembed-backed provider. Downloads the model on first use.
pub struct FastEmbedder {
    model: TextEmbedding,
    model_id: String,
    options: BuiltinOptions,
}

impl FastEmbedder {
    pub fn new(options: BuiltinOptions) -> Result<Self> {
        let kind = EmbeddingModel::AllMiniLML6V2;
        let model_id = kind.to_string();
        let model = TextEmbedding::try_new(InitOptions::new(kind))
            .context("Failed to initialize fastembed model")?;

        Ok(Self {
            model,
            model_id,
            options,
        })
    }
}

impl EmbeddingProvider for FastEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn batch_size(&self) -> usize {
        self.options.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<Cow<'_, str>> = texts
            .iter()
            .map(|text| truncate_chars(text, self.options.max_chars))
            .collect();
        let batch_size = self.batch_size();
        let mut vectors = self.model.embed(&inputs, Some(batch_size))?;

        if self.options.normalize {
            vectors.iter_mut().for_each(|v| normalize(v));
        }
        Ok(vectors)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(text[..end].to_owned()),
        None => Cow::Borrowed(text),
    }
}

fn normalize(vector: &mut [f32]) {
    let norm = magnitude(vector);
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Read `name`, falling back to `default` when unset or blank.
fn env_override<T>(name: &str, default: T, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(default),
        Err(err) => return Err(err).with_context(|| format!("Failed to read {}", name)),
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(default);
    }
    parse(value).ok_or_else(|| anyhow!("Invalid {} value: {}", name, value))
}

fn parse_usize(value: &str) -> Option<usize> {
    value.parse().ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
