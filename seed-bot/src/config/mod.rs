//! Application configuration: BaseConfig (paths, logging, prompt) plus per-concern
//! configs (embedding, LLM, memory, trend). Everything is loaded from env.

mod base;
mod memory;
mod seed_config;
mod trend;


pub use base::BaseConfig;
pub use memory::{EnvMemoryConfig, MemoryConfig};
pub use seed_config::SeedConfig;
pub use trend::EnvTrendConfig;
