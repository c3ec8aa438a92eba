//! Session transcript document types.

use chrono::Utc;
use prompt::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "New Chat";
pub const TITLE_MAX_CHARS: usize = 60;

/// One turn of a saved conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTurn {
    pub role: String,
    #[serde(default)]
    pub text: String,
    /// Mood label the assistant attached to its reply; absent means neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl SessionTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
            emotion: None,
        }
    }

    pub fn assistant(text: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            text: text.into(),
            emotion: Some(emotion.into()),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role.eq_ignore_ascii_case("assistant")
    }

    /// Normalized mood label: trimmed, lowercase; `None` when absent, blank or neutral.
    pub fn mood_label(&self) -> Option<String> {
        let label = self.emotion.as_deref()?.trim().to_lowercase();
        if label.is_empty() || label == "neutral" {
            return None;
        }
        Some(label)
    }

    /// Converts to a backend message; unknown roles are dropped.
    pub fn to_chat_message(&self) -> Option<ChatMessage> {
        MessageRole::parse(&self.role).map(|role| ChatMessage {
            role,
            content: self.text.clone(),
        })
    }
}

/// A saved chat session. Reads also accept the legacy `sid`/`chat` field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTranscript {
    #[serde(alias = "sid")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Unix seconds of the last save.
    #[serde(default)]
    pub updated: i64,
    #[serde(default, alias = "chat")]
    pub turns: Vec<SessionTurn>,
}

impl SessionTranscript {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            updated: Utc::now().timestamp(),
            turns: Vec::new(),
        }
    }

    /// First turn's text cut to [`TITLE_MAX_CHARS`] characters, or [`DEFAULT_TITLE`].
    pub fn derive_title(turns: &[SessionTurn]) -> String {
        turns
            .first()
            .map(|t| t.text.trim().chars().take(TITLE_MAX_CHARS).collect::<String>())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Turns as backend messages, for replaying history into a new turn.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.turns.iter().filter_map(SessionTurn::to_chat_message).collect()
    }
}
