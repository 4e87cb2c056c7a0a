// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document records and per-query search results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A metadata value attached to a document.
///
/// Metadata is opaque to the engine and handed back exactly as it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<MetadataValue>),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Boolean(value)
    }
}

/// Document metadata keyed by name.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Input for indexing a document. The embedding is computed by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl NewDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The text handed to the embedding provider: `"{title}. {content}"`.
    pub fn embedding_text(&self) -> String {
        embedding_text(&self.title, &self.content)
    }
}

/// An indexed document together with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Unique identifier within the store
    pub id: String,
    pub title: String,
    pub content: String,
    pub metadata: Metadata,
    /// Embedding of `"{title}. {content}"`
    pub embedding: Vec<f32>,
    /// Number of whitespace-separated words in `content`
    pub word_count: usize,
    /// Unix timestamp (seconds) when this document was indexed
    pub indexed_at: i64,
}

impl Document {
    /// Builds a record from indexing input and the embedding computed for it.
    pub fn from_input(input: NewDocument, embedding: Vec<f32>) -> Self {
        let word_count = input.content.split_whitespace().count();
        let indexed_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        Self {
            id: input.id,
            title: input.title,
            content: input.content,
            metadata: input.metadata,
            embedding,
            word_count,
            indexed_at,
        }
    }

    /// The text that was embedded for this document.
    pub fn full_text(&self) -> String {
        embedding_text(&self.title, &self.content)
    }

    /// Approximate heap footprint of this record in bytes.
    pub(crate) fn approx_size_bytes(&self) -> usize {
        self.id.len()
            + self.title.len()
            + self.content.len()
            + self.embedding.len() * std::mem::size_of::<f32>()
    }
}

fn embedding_text(title: &str, content: &str) -> String {
    format!("{}. {}", title, content)
}

/// A ranked search hit. Shares the stored document read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matching document
    pub document: Arc<Document>,
    /// Cosine similarity to the query (-1.0 to 1.0)
    pub similarity: f32,
    /// 1-based position in this query's ranking
    pub rank: usize,
}

impl SearchResult {
    pub fn id(&self) -> &str {
        &self.document.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_text_joins_title_and_content() {
        let input = NewDocument::new("d1", "AI Basics", "Machine learning concepts");
        assert_eq!(input.embedding_text(), "AI Basics. Machine learning concepts");

        let doc = Document::from_input(input, vec![0.0; 2]);
        assert_eq!(doc.full_text(), "AI Basics. Machine learning concepts");
        assert_eq!(doc.word_count, 3);
        assert!(doc.indexed_at > 0);
    }

    #[test]
    fn test_metadata_passes_through_json() {
        let json = r#"{
            "id": "tech001",
            "title": "Intro",
            "content": "text",
            "metadata": {"category": "technology", "level": 2, "score": 0.5, "draft": false, "tags": ["AI", "ML"]}
        }"#;
        let input: NewDocument = serde_json::from_str(json).unwrap();

        assert_eq!(input.metadata["category"], MetadataValue::from("technology"));
        assert_eq!(input.metadata["level"], MetadataValue::Integer(2));
        assert_eq!(input.metadata["score"], MetadataValue::Float(0.5));
        assert_eq!(input.metadata["draft"], MetadataValue::Boolean(false));
        assert_eq!(
            input.metadata["tags"],
            MetadataValue::List(vec!["AI".into(), "ML".into()])
        );

        let back = serde_json::to_value(&input.metadata).unwrap();
        assert_eq!(back["tags"][1], "ML");
        assert_eq!(back["level"], 2);
    }

    #[test]
    fn test_metadata_defaults_to_empty() {
        let input: NewDocument =
            serde_json::from_str(r#"{"id": "x", "title": "t", "content": "c"}"#).unwrap();
        assert!(input.metadata.is_empty());
    }
}
