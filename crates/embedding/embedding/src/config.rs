//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// Base URL of the embedding backend (OLLAMA_HOST).
    fn host(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout(&self) -> Duration;
    /// Expected vector length; `None` disables the dimension check in the memory store.
    fn dimension(&self) -> Option<usize>;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub ollama_host: String,
    pub embed_model: String,
    pub embed_timeout_secs: u64,
    pub embedding_dimension: Option<usize>,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn host(&self) -> &str {
        &self.ollama_host
    }
    fn model(&self) -> &str {
        &self.embed_model
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }
    fn dimension(&self) -> Option<usize> {
        self.embedding_dimension
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let ollama_host = env::var("OLLAMA_HOST")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:11434".to_string());
        let embed_model =
            env::var("EMBED_MODEL").unwrap_or_else(|_| "nomic-embed-text".to_string());
        let embed_timeout_secs = env::var("EMBED_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let embedding_dimension = env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok());
        Ok(Self {
            ollama_host,
            embed_model,
            embed_timeout_secs,
            embedding_dimension,
        })
    }

    /// Validate config (model must be set, timeout and dimension must be non-zero).
    pub fn validate(&self) -> Result<()> {
        if self.embed_model.trim().is_empty() {
            anyhow::bail!("EMBED_MODEL must not be empty");
        }
        if self.embed_timeout_secs == 0 {
            anyhow::bail!("EMBED_TIMEOUT_SECS must be greater than zero");
        }
        if self.embedding_dimension == Some(0) {
            anyhow::bail!("EMBEDDING_DIMENSION must be greater than zero when set");
        }
        Ok(())
    }
}
