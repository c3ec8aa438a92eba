//! Memory retrieval configuration.

use anyhow::Result;
use std::env;

use memory_strategies::DEFAULT_TOP_K;

/// Memory retrieval configuration interface.
pub trait MemoryConfig: Send + Sync {
    /// Number of memory snippets injected per turn (MEMORY_TOP_K).
    fn top_k(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct EnvMemoryConfig {
    pub memory_top_k: usize,
}

impl MemoryConfig for EnvMemoryConfig {
    fn top_k(&self) -> usize {
        self.memory_top_k
    }
}

impl EnvMemoryConfig {
    pub fn from_env() -> Result<Self> {
        let memory_top_k = env::var("MEMORY_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOP_K);
        Ok(Self { memory_top_k })
    }
}
