//! Component factory: builds the chat pipeline and its stores from [`SeedConfig`].

use std::sync::Arc;

use anyhow::Result;
use embedding::{EmbeddingConfig, EmbeddingService};
use llm_client::{LlmClient, OllamaLlmClient};
use memory_core::MemoryStore;
use memory_json::JsonMemoryStore;
use ollama_embedding::OllamaEmbedding;
use tracing::{info, instrument};

use crate::chat::ChatService;
use crate::config::SeedConfig;
use crate::session::{JsonSessionStore, SessionStore};

/// Everything a CLI command may need.
pub struct SeedComponents {
    pub memory_store: Arc<dyn MemoryStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub embedding_service: Arc<dyn EmbeddingService>,
    pub llm: Arc<dyn LlmClient>,
    pub chat: ChatService,
}

#[instrument(skip(config))]
pub fn build_components(config: &SeedConfig) -> Result<SeedComponents> {
    let memories_dir = config.base.memories_dir();
    let sessions_dir = config.base.sessions_dir();
    info!(
        memories_dir = %memories_dir.display(),
        sessions_dir = %sessions_dir.display(),
        embed_model = %config.embedding.embed_model,
        model = %config.llm.model_name,
        "Building components"
    );

    let memory_store: Arc<dyn MemoryStore> = Arc::new(
        JsonMemoryStore::new(memories_dir).with_dimension_opt(config.embedding.dimension()),
    );
    let sessions: Arc<dyn SessionStore> = Arc::new(JsonSessionStore::new(sessions_dir));
    let embedding_service: Arc<dyn EmbeddingService> =
        Arc::new(OllamaEmbedding::from_config(&config.embedding));
    let llm: Arc<dyn LlmClient> = Arc::new(OllamaLlmClient::from_config(&config.llm));

    let chat = ChatService::new(
        memory_store.clone(),
        embedding_service.clone(),
        sessions.clone(),
        llm.clone(),
    )
    .with_system_prompt(config.base.load_system_prompt())
    .with_top_k(config.memory_top_k())
    .with_trend_config(config.trend().clone());

    Ok(SeedComponents {
        memory_store,
        sessions,
        embedding_service,
        llm,
        chat,
    })
}
