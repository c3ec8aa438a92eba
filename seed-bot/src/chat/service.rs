//! [`ChatService`]: orchestrates the memory subsystem around one generation call.

use std::sync::Arc;

use chrono::Utc;
use embedding::EmbeddingService;
use llm_client::{LlmClient, LlmError};
use memory_core::{MemoryRecord, MemoryRole, MemoryStore, UserId};
use memory_strategies::{SemanticRetriever, DEFAULT_TOP_K};
use prompt::{ChatMessage, DEFAULT_SYSTEM_MESSAGE};
use tracing::{error, info, instrument, warn};

use crate::core::{Result, SeedError};
use crate::reply::parse_reply;
use crate::session::{ensure_session_id, SessionStore, SessionTurn};
use crate::trend::{TrendAnalyzer, TrendConfig, TrendHint};

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub user: String,
    pub message: String,
    /// Prior turns of the current conversation, oldest first.
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub reply: String,
    pub emotion: String,
    /// Memory snippets injected into the system prompt, best first.
    pub used_memory: Vec<String>,
    pub trend: Option<TrendHint>,
}

/// A turn recorded into a session transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionChatTurn {
    pub session_id: String,
    pub turn: ChatTurn,
}

pub struct ChatService {
    memory_store: Arc<dyn MemoryStore>,
    retriever: SemanticRetriever,
    trend: TrendAnalyzer,
    sessions: Arc<dyn SessionStore>,
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    top_k: usize,
}

impl ChatService {
    pub fn new(
        memory_store: Arc<dyn MemoryStore>,
        embedding_service: Arc<dyn EmbeddingService>,
        sessions: Arc<dyn SessionStore>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            retriever: SemanticRetriever::new(memory_store.clone(), embedding_service),
            memory_store,
            trend: TrendAnalyzer::new(sessions.clone(), TrendConfig::default()),
            sessions,
            llm,
            system_prompt: DEFAULT_SYSTEM_MESSAGE.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_trend_config(mut self, config: TrendConfig) -> Self {
        self.trend = TrendAnalyzer::new(self.sessions.clone(), config);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn retriever(&self) -> &SemanticRetriever {
        &self.retriever
    }

    pub fn trend_analyzer(&self) -> &TrendAnalyzer {
        &self.trend
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn memory_store(&self) -> &Arc<dyn MemoryStore> {
        &self.memory_store
    }

    /// Runs one turn at the current time.
    pub async fn handle_turn(&self, request: ChatRequest) -> Result<ChatTurn> {
        self.handle_turn_at(request, Utc::now().timestamp()).await
    }

    /// Runs one turn, evaluating the mood trend as of `now` (unix seconds).
    #[instrument(skip(self, request), fields(user = %request.user))]
    pub async fn handle_turn_at(&self, request: ChatRequest, now: i64) -> Result<ChatTurn> {
        let user = UserId::parse(&request.user)?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(SeedError::Validation("message must not be empty".to_string()));
        }
        info!(user = %user, chars = message.chars().count(), history = request.history.len(), "step: chat turn started");

        let query_vector = self.retriever.embed_query(message).await;
        let retrieved = self
            .retriever
            .retrieve(&user, query_vector.as_deref(), self.top_k)
            .await;
        let trend = self.trend.analyze(&user, now).await;

        let memory_block = retrieved.render();
        let trend_block = trend.as_ref().map(TrendHint::render);
        let system = prompt::assemble(&self.system_prompt, trend_block.as_deref(), memory_block.as_deref());
        let messages = prompt::build_messages(&system, request.history, message);
        info!(
            user = %user,
            memories = retrieved.len(),
            has_trend = trend.is_some(),
            messages = messages.len(),
            "step: context assembled"
        );

        let raw = self.llm.chat(messages).await.map_err(|e| {
            error!(user = %user, model = %self.llm.model(), error = %e, "Generation failed, no memory recorded");
            e
        })?;
        if raw.trim().is_empty() {
            return Err(SeedError::Generation(LlmError::EmptyReply));
        }

        self.record(&user, MemoryRecord::with_embedding(MemoryRole::User, message, query_vector))
            .await;
        let reply_text = raw.trim();
        let reply_vector = self.retriever.embed_query(reply_text).await;
        self.record(&user, MemoryRecord::with_embedding(MemoryRole::Assistant, reply_text, reply_vector))
            .await;

        let parsed = parse_reply(&raw);
        info!(user = %user, emotion = %parsed.emotion, reply_chars = parsed.reply.chars().count(), "step: chat turn done");
        Ok(ChatTurn {
            reply: parsed.reply,
            emotion: parsed.emotion,
            used_memory: retrieved.texts().into_iter().map(String::from).collect(),
            trend,
        })
    }

    /// Runs a turn inside a saved session: replays its history, then appends the
    /// user message and the parsed reply. A missing id starts a new session.
    pub async fn handle_session_turn(
        &self,
        user: &str,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<SessionChatTurn> {
        let user_id = UserId::parse(user)?;
        let session_id = ensure_session_id(session_id);
        let history = match self.sessions.load(&user_id, &session_id).await {
            Ok(transcript) => transcript.map(|t| t.history()).unwrap_or_default(),
            Err(e) => {
                error!(user = %user_id, session_id = %session_id, error = %e, "Session history unreadable, continuing without it");
                Vec::new()
            }
        };

        let turn = self
            .handle_turn(ChatRequest::new(user, message).with_history(history))
            .await?;

        let turns = vec![
            SessionTurn::user(message.trim()),
            SessionTurn::assistant(turn.reply.clone(), turn.emotion.clone()),
        ];
        if let Err(e) = self.sessions.append_turns(&user_id, &session_id, turns).await {
            error!(user = %user_id, session_id = %session_id, error = %e, "Failed to save session transcript");
        }
        Ok(SessionChatTurn { session_id, turn })
    }

    async fn record(&self, user: &UserId, record: MemoryRecord) {
        let role = record.role;
        match self.memory_store.append(user, record).await {
            Ok(outcome) if outcome.is_stored() => {}
            Ok(outcome) => warn!(user = %user, role = %role, outcome = ?outcome, "Memory record skipped"),
            Err(e) => error!(user = %user, role = %role, error = %e, "Failed to append memory record"),
        }
    }
}
