//! # Text Embeddings
//!
//! This crate defines the embedding service interface for generating text embeddings.
//!
//! An embedding failure is never fatal for a chat turn: callers treat every
//! [`EmbeddingError`] as "embedding unavailable" and skip the dependent feature.

use async_trait::async_trait;
use thiserror::Error;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig};

/// Why an embedding could not be produced.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Input text was empty after trimming; no request was issued.
    #[error("Empty input text")]
    EmptyInput,

    /// Backend unreachable, timed out, or answered with a non-success status.
    #[error("Embedding backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered but the payload could not be understood.
    #[error("Malformed embedding response: {0}")]
    Malformed(String),
}

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
