//! LLM configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Sampling options forwarded to the backend as `options`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub num_ctx: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_ctx: 4096,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// LLM configuration interface for the Ollama chat API.
pub trait LlmConfig: Send + Sync {
    fn host(&self) -> &str;
    fn model(&self) -> &str;
    fn options(&self) -> GenerationOptions;
    fn timeout(&self) -> Duration;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub ollama_host: String,
    pub model_name: String,
    pub num_ctx: u32,
    pub gen_temp: f32,
    pub top_p: f32,
    pub llm_timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn host(&self) -> &str {
        &self.ollama_host
    }
    fn model(&self) -> &str {
        &self.model_name
    }
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            num_ctx: self.num_ctx,
            temperature: self.gen_temp,
            top_p: self.top_p,
        }
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = GenerationOptions::default();
        let ollama_host = env::var("OLLAMA_HOST")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:11434".to_string());
        let model_name =
            env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-oss:120b-cloud".to_string());
        let num_ctx = env::var("NUM_CTX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.num_ctx);
        let gen_temp = env::var("GEN_TEMP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.temperature);
        let top_p = env::var("TOP_P")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.top_p);
        let llm_timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120);
        Ok(Self {
            ollama_host,
            model_name,
            num_ctx,
            gen_temp,
            top_p,
            llm_timeout_secs,
        })
    }

    /// Validate config (sampling parameters within range, model set).
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            anyhow::bail!("MODEL_NAME must not be empty");
        }
        if self.num_ctx == 0 {
            anyhow::bail!("NUM_CTX must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.gen_temp) {
            anyhow::bail!("GEN_TEMP must be within 0.0..=2.0, got {}", self.gen_temp);
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            anyhow::bail!("TOP_P must be within 0.0..=1.0, got {}", self.top_p);
        }
        Ok(())
    }
}
