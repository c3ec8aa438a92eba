//! Shared test doubles for retrieval tests.

use std::collections::HashMap;

use async_trait::async_trait;
use embedding::{EmbeddingError, EmbeddingService};

/// Returns canned vectors per text; unknown texts fail as unavailable.
pub struct MockEmbeddingService {
    vectors: HashMap<String, Vec<f32>>,
}

impl MockEmbeddingService {
    pub fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: pairs
                .iter()
                .map(|(text, v)| (text.to_string(), v.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::Unavailable("mock: no vector".to_string()))
    }

    fn model(&self) -> &str {
        "mock"
    }
}
