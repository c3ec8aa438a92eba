//! Ollama embedding service (`POST {host}/api/embeddings`).
//!
//! Every failure is reported as an [`EmbeddingError`]; nothing here panics or
//! retries. The returned vector's dimension is not checked.

use std::time::Duration;

use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingError, EmbeddingService};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct OllamaEmbedding {
    client: Client,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl OllamaEmbedding {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/embeddings", host.trim_end_matches('/')),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        Self::new(config.host(), config.model()).with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OllamaEmbedding {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_MODEL)
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingService for OllamaEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        const LOG_PREVIEW_LEN: usize = 200;
        if text.trim().is_empty() {
            debug!("Ollama embed empty input, skipping");
            return Err(EmbeddingError::EmptyInput);
        }
        let text_preview: String = text.chars().take(LOG_PREVIEW_LEN).collect();
        info!(model = %self.model, text_preview = %text_preview, text_len = text.len(), "step: embedding Ollama embed request");

        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(timeout_secs = self.timeout.as_secs(), "Ollama embed request timed out");
                } else {
                    warn!(error = %e, "Ollama embed request failed");
                }
                EmbeddingError::Unavailable(e.to_string())
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, body = %error_text, "Ollama embed returned error status");
            return Err(EmbeddingError::Unavailable(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }
        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Ollama embed response could not be decoded");
            EmbeddingError::Malformed(e.to_string())
        })?;
        if body.embedding.is_empty() {
            warn!("Ollama embed response has no embedding data");
            return Err(EmbeddingError::Malformed("No embedding in response".to_string()));
        }
        info!(dimension = body.embedding.len(), "step: embedding Ollama embed done");
        Ok(body.embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
