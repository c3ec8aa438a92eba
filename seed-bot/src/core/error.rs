//! Error types for the chat pipeline.
//!
//! [`SeedError`] is what a chat turn can fail with. Embedding and storage
//! failures never appear here: they degrade the turn instead of failing it.

use llm_client::LlmError;
use memory_core::InvalidUserId;
use thiserror::Error;

/// Top-level error for a chat turn: bad input or failed generation.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),
}

impl From<InvalidUserId> for SeedError {
    fn from(e: InvalidUserId) -> Self {
        SeedError::Validation(e.to_string())
    }
}

/// Result type for pipeline operations; uses [`SeedError`].
pub type Result<T> = std::result::Result<T, SeedError>;
