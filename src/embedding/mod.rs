// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding module - the text-to-vector collaborator of the search engine
//!
//! The engine never computes embeddings itself; it asks an
//! [`EmbeddingProvider`] handed to it at construction time.

#[cfg(not(all(target_os = "macos", target_arch = "x86_64")))]
pub mod builtin;
pub mod command;
pub mod provider;

#[cfg(not(all(target_os = "macos", target_arch = "x86_64")))]
pub use builtin::{BuiltinOptions, FastEmbedder};
pub use command::CommandProvider;
pub use provider::{
    create_provider, embed_checked, DummyProvider, EmbeddingProvider, DEFAULT_EMBEDDING_DIM,
};
