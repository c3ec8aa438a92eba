//! Ollama implementation of [`LlmClient`] (`POST {host}/api/chat`, non-streamed).

use std::time::Duration;

use async_trait::async_trait;
use prompt::ChatMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::config::{GenerationOptions, LlmConfig};
use super::{LlmClient, LlmError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct OllamaLlmClient {
    client: Client,
    endpoint: String,
    model: String,
    options: GenerationOptions,
    timeout: Duration,
}

impl OllamaLlmClient {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", host.trim_end_matches('/')),
            model: model.into(),
            options: GenerationOptions::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::new(config.host(), config.model())
            .with_options(config.options())
            .with_timeout(config.timeout())
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireOptions {
    num_ctx: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    options: WireOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl LlmClient for OllamaLlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model, message_count = messages.len()))]
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options: WireOptions {
                num_ctx: self.options.num_ctx,
                temperature: self.options.temperature,
                top_p: self.options.top_p,
            },
        };
        info!(num_ctx = self.options.num_ctx, "step: generation request");
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "Ollama chat request failed");
                LlmError::Unavailable(e.to_string())
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, body = %error_text, "Ollama chat returned error status");
            return Err(LlmError::Unavailable(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }
        let body: ChatResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Ollama chat response could not be decoded");
            LlmError::Malformed(e.to_string())
        })?;
        if body.message.content.trim().is_empty() {
            return Err(LlmError::EmptyReply);
        }
        info!(reply_len = body.message.content.len(), "step: generation done");
        Ok(body.message.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
