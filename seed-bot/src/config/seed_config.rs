//! SeedConfig: BaseConfig + the per-concern configs. Use load() for env-based loading.

use anyhow::Result;

use embedding::EnvEmbeddingConfig;
use llm_client::EnvLlmConfig;

use super::{BaseConfig, EnvMemoryConfig, EnvTrendConfig, MemoryConfig};
use crate::trend::TrendConfig;

pub struct SeedConfig {
    pub base: BaseConfig,
    pub embedding: EnvEmbeddingConfig,
    pub llm: EnvLlmConfig,
    pub memory: EnvMemoryConfig,
    pub trend: EnvTrendConfig,
}

impl SeedConfig {
    /// Load full config from environment variables. Call validate() before init.
    pub fn load() -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load()?,
            embedding: EnvEmbeddingConfig::from_env()?,
            llm: EnvLlmConfig::from_env()?,
            memory: EnvMemoryConfig::from_env()?,
            trend: EnvTrendConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.embedding.validate()?;
        self.llm.validate()?;
        self.trend.validate()
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn memory_top_k(&self) -> usize {
        self.memory.top_k()
    }
    pub fn trend(&self) -> &TrendConfig {
        &self.trend.trend
    }
}
