//! # Retrieval
//!
//! Ranks a user's stored memory records against a query vector and returns the
//! most similar ones as a labeled context block.
//!
//! ## Logging
//!
//! Retrieval emits `tracing` logs so memory behavior can be inspected in production:
//! - whether the query embedding was available
//! - collection size and score distribution
//! - number of records returned
//!
//! ## External Interactions
//!
//! - **memory-core**: `MemoryStore`, `MemoryRecord`, `cosine_similarity`
//! - **embedding**: `EmbeddingService` for the query vector
//! - **prompt**: memory block formatting

mod semantic_search;

pub use semantic_search::{rank, RetrievedContext, ScoredMemory, SemanticRetriever, DEFAULT_TOP_K};
