// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embeddings from an external process.
//!
//! The command runs under `sh -c`, receives `{"model": ..., "texts": [...]}`
//! on stdin and prints either a bare JSON array of vectors or an object
//! holding one under `embeddings`, `vectors` or `data`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};

use super::provider::EmbeddingProvider;

const COMMAND_BATCH_SIZE: usize = 64;

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    texts: &'a [String],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Response {
    Bare(Vec<Vec<f32>>),
    Wrapped {
        #[serde(alias = "vectors", alias = "data")]
        embeddings: Vec<Vec<f32>>,
    },
}

impl Response {
    fn into_vectors(self) -> Vec<Vec<f32>> {
        match self {
            Response::Bare(vectors) | Response::Wrapped { embeddings: vectors } => vectors,
        }
    }
}

/// Shells out to a user-supplied embedding command.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: String,
    model: String,
    batch_size: usize,
}

impl CommandProvider {
    pub fn new(command: String, model: String) -> Self {
        Self {
            command,
            model,
            batch_size: COMMAND_BATCH_SIZE,
        }
    }

    /// Texts sent per command invocation (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn run(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = serde_json::to_vec(&Request {
            model: &self.model,
            texts,
        })?;

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn embedding command: {}", self.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&request)
                .context("Failed to send texts to embedding command")?;
        }

        let output = child
            .wait_with_output()
            .context("Failed to read embedding command output")?;
        if !output.status.success() {
            bail!(
                "Embedding command failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let vectors = parse_response(&output.stdout)?;
        if vectors.len() != texts.len() {
            bail!(
                "Embedding command returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            );
        }
        Ok(vectors)
    }
}

impl EmbeddingProvider for CommandProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size()) {
            vectors.extend(self.run(batch)?);
        }
        Ok(vectors)
    }
}

fn parse_response(stdout: &[u8]) -> Result<Vec<Vec<f32>>> {
    let response: Response = serde_json::from_slice(stdout)
        .context("Embedding command must print a JSON array of vectors")?;
    Ok(response.into_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_shapes() {
        let bare = parse_response(b"[[1.0, 2.0], [3, 4]]").unwrap();
        assert_eq!(bare, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);

        let wrapped = parse_response(br#"{"embeddings": [[0.5]]}"#).unwrap();
        assert_eq!(wrapped, vec![vec![0.5]]);

        let data = parse_response(br#"{"data": [[0.25, 0.0]]}"#).unwrap();
        assert_eq!(data, vec![vec![0.25, 0.0]]);

        assert!(parse_response(br#"{"other": []}"#).is_err());
        assert!(parse_response(br#"[["x"]]"#).is_err());
        assert!(parse_response(b"not json").is_err());
    }

    #[test]
    fn runs_command() {
        let mut provider = CommandProvider::new(
            r#"cat > /dev/null; echo '{"vectors": [[1, 0, 0]]}'"#.to_string(),
            "echo".to_string(),
        );
        assert_eq!(provider.embed_one("hello").unwrap(), vec![1.0, 0.0, 0.0]);
        assert!(provider.embed_texts(&[]).unwrap().is_empty());
    }

    #[test]
    fn splits_texts_into_batches() {
        // Answers every invocation with a single vector.
        let mut provider = CommandProvider::new(
            "cat > /dev/null; echo '[[0.5, 0.5]]'".to_string(),
            "single".to_string(),
        )
        .with_batch_size(1);
        assert_eq!(provider.batch_size(), 1);

        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let vectors = provider.embed_texts(&texts).unwrap();
        assert_eq!(vectors, vec![vec![0.5, 0.5]; 3]);

        let mut unbatched = provider.with_batch_size(8);
        assert!(unbatched.embed_texts(&texts).is_err());
        let clamped = CommandProvider::new("true".into(), "m".into()).with_batch_size(0);
        assert_eq!(clamped.batch_size(), 1);
    }

    #[test]
    fn reports_command_failure() {
        let mut provider = CommandProvider::new(
            "cat > /dev/null; echo boom >&2; exit 3".to_string(),
            "broken".to_string(),
        );
        let err = provider.embed_one("text").unwrap_err();
        assert!(format!("{:#}", err).contains("boom"));
    }

    #[test]
    fn reports_vector_count_mismatch() {
        let mut provider = CommandProvider::new(
            "cat > /dev/null; echo '[[1], [2]]'".to_string(),
            "double".to_string(),
        );
        let err = provider.embed_one("text").unwrap_err();
        assert!(err.to_string().contains("2 vectors for 1 texts"));
    }
}
