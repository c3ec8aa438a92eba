//! Shared test doubles for the chat pipeline.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use embedding::{EmbeddingError, EmbeddingService};
use llm_client::{LlmClient, LlmError};
use memory_core::InMemoryMemoryStore;
use prompt::ChatMessage;
use seed_bot::{ChatService, JsonSessionStore};

/// Canned vectors per text, with an optional fallback for any other text.
pub struct MockEmbeddingService {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Option<Vec<f32>>,
    calls: AtomicUsize,
}

impl MockEmbeddingService {
    pub fn new(pairs: &[(&str, Vec<f32>)], fallback: Option<Vec<f32>>) -> Self {
        Self {
            vectors: pairs
                .iter()
                .map(|(text, v)| (text.to_string(), v.clone()))
                .collect(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Same vector for every text.
    pub fn uniform(vector: Vec<f32>) -> Self {
        Self::new(&[], Some(vector))
    }

    /// Backend down: every call fails.
    pub fn unavailable() -> Self {
        Self::new(&[], None)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| EmbeddingError::Unavailable("mock: connection refused".to_string()))
    }

    fn model(&self) -> &str {
        "mock-embed"
    }
}

/// Returns a fixed reply (or error) and records every message list it receives.
pub struct MockLlmClient {
    reply: Result<String, String>,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn last_system_prompt(&self) -> String {
        self.last_messages()
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(messages);
        self.reply.clone().map_err(LlmError::Unavailable)
    }

    fn model(&self) -> &str {
        "mock-llm"
    }
}

/// A service over an in-memory memory store and a temp-dir session store.
pub struct Harness {
    pub service: ChatService,
    pub memory: Arc<InMemoryMemoryStore>,
    pub sessions: Arc<JsonSessionStore>,
    pub embedder: Arc<MockEmbeddingService>,
    pub llm: Arc<MockLlmClient>,
    pub _dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(embedder: MockEmbeddingService, llm: MockLlmClient) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let memory = Arc::new(InMemoryMemoryStore::new());
        let sessions = Arc::new(JsonSessionStore::new(dir.path().join("sessions")));
        let embedder = Arc::new(embedder);
        let llm = Arc::new(llm);
        let service = ChatService::new(memory.clone(), embedder.clone(), sessions.clone(), llm.clone())
            .with_system_prompt("You are a test companion.");
        Self {
            service,
            memory,
            sessions,
            embedder,
            llm,
            _dir: dir,
        }
    }
}
