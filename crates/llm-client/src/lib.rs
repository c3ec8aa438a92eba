//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an Ollama implementation. Transport-agnostic;
//! the chat pipeline only sees [`LlmClient::chat`].
//!
//! Unlike embedding failures, a generation failure is fatal for the turn.

use async_trait::async_trait;
use prompt::ChatMessage;
use thiserror::Error;

mod config;
mod ollama_llm;

pub use config::{EnvLlmConfig, GenerationOptions, LlmConfig};
pub use ollama_llm::OllamaLlmClient;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Backend unreachable, timed out, or answered with a non-success status.
    #[error("Generation backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with a payload that does not match `{message: {content}}`.
    #[error("Malformed generation response: {0}")]
    Malformed(String),

    #[error("Generation backend returned an empty reply")]
    EmptyReply,
}

/// LLM client interface: non-streamed completion from a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;

    fn model(&self) -> &str;
}
