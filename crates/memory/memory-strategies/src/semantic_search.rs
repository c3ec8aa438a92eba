//! Semantic retrieval: cosine ranking over a user's full memory collection.

use std::sync::Arc;

use embedding::EmbeddingService;
use memory_core::{cosine_similarity, MemoryRecord, MemoryStore, UserId};
use tracing::{debug, info, warn};

pub const DEFAULT_TOP_K: usize = 3;

/// A stored record with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMemory {
    pub score: f64,
    pub record: MemoryRecord,
}

/// Ranked retrieval result, best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedContext {
    pub memories: Vec<ScoredMemory>,
}

impl RetrievedContext {
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.memories.iter().map(|m| m.record.text.as_str()).collect()
    }

    /// `[Relevant Context]:` block, or `None` when nothing was retrieved.
    pub fn render(&self) -> Option<String> {
        prompt::format_memory_block(self.texts())
    }
}

/// Scores every record against `query` and keeps the best `top_k`.
///
/// The sort is stable, so equal scores keep append order. Records whose
/// dimension differs from the query score `0.0`.
pub fn rank(records: Vec<MemoryRecord>, query: &[f32], top_k: usize) -> Vec<ScoredMemory> {
    let mut scored: Vec<ScoredMemory> = records
        .into_iter()
        .map(|record| ScoredMemory {
            score: cosine_similarity(query, &record.vector),
            record,
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// Retrieval engine over a [`MemoryStore`].
pub struct SemanticRetriever {
    store: Arc<dyn MemoryStore>,
    embedding_service: Arc<dyn EmbeddingService>,
    top_k: usize,
}

impl SemanticRetriever {
    pub fn new(store: Arc<dyn MemoryStore>, embedding_service: Arc<dyn EmbeddingService>) -> Self {
        Self {
            store,
            embedding_service,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embeds `query`; `None` when the embedding backend is unavailable.
    pub async fn embed_query(&self, query: &str) -> Option<Vec<f32>> {
        match self.embedding_service.embed(query).await {
            Ok(vector) => {
                info!(dimension = vector.len(), "step: embedding query vector done");
                Some(vector)
            }
            Err(e) => {
                warn!(error = %e, model = %self.embedding_service.model(), "Query embedding unavailable, skipping memory retrieval");
                None
            }
        }
    }

    /// Ranks `user`'s memory against `query_vector`. Empty when the vector is
    /// missing or the collection is empty.
    pub async fn retrieve(&self, user: &UserId, query_vector: Option<&[f32]>, top_k: usize) -> RetrievedContext {
        let query = match query_vector {
            Some(q) if !q.is_empty() => q,
            _ => {
                debug!(user = %user, "No query vector, skipping memory retrieval");
                return RetrievedContext::default();
            }
        };
        if top_k == 0 {
            return RetrievedContext::default();
        }
        let records = self.store.load(user).await;
        if records.is_empty() {
            debug!(user = %user, "Memory collection empty");
            return RetrievedContext::default();
        }
        let collection_size = records.len();
        let memories = rank(records, query, top_k);
        if let (Some(best), Some(worst)) = (memories.first(), memories.last()) {
            info!(user = %user, collection_size, returned = memories.len(), score_max = best.score, score_min = worst.score, "step: memory retrieval done");
        }
        RetrievedContext { memories }
    }

    /// Embeds `query` and retrieves the configured top-k.
    pub async fn retrieve_for_query(&self, user: &UserId, query: &str) -> RetrievedContext {
        let vector = self.embed_query(query).await;
        self.retrieve(user, vector.as_deref(), self.top_k).await
    }
}
