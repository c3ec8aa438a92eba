//! # Prompt
//!
//! Assembles the system prompt handed to the generation backend.
//!
//! ## Format
//!
//! - **Base prompt**: deployment instructions (file or default)
//! - **Trend block** (optional): `[PSYCHOLOGICAL TREND ANALYSIS]:` lines
//! - **Memory block** (optional): `[Relevant Context]:` followed by `- text` lines
//!
//! Blocks are joined in that fixed order, separated by a blank line. Nothing is
//! truncated here; bounding the total context is the generation backend's
//! `num_ctx` setting.
//!
//! ## External interactions
//!
//! - **Generation backend**: [`build_messages`] output is sent as the chat `messages` array.

/// Role of a message, one-to-one with chat API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Parses an API role name (case-insensitive).
    pub fn parse(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "system" => Some(MessageRole::System),
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

/// A single chat message, one element of the backend `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Base instruction used when no prompt file is configured or found.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are A SEED.";

/// Label opening the retrieved-memory block.
pub const SECTION_MEMORY: &str = "[Relevant Context]:";

/// Separator between prompt blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Formats retrieved texts as the labeled memory block. `None` when there is nothing to show.
///
/// ```
/// let block = prompt::format_memory_block(["likes tea", "lives in Hue"]).unwrap();
/// assert_eq!(block, "[Relevant Context]:\n- likes tea\n- lives in Hue");
/// ```
pub fn format_memory_block<I, T>(texts: I) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let lines: Vec<String> = texts
        .into_iter()
        .map(|t| format!("- {}", t.as_ref().trim()))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", SECTION_MEMORY, lines.join("\n")))
}

/// Concatenates base prompt, trend block and memory block in that order.
///
/// Blank or absent blocks are omitted. Deterministic; no truncation.
pub fn assemble(base_prompt: &str, trend_block: Option<&str>, memory_block: Option<&str>) -> String {
    let mut out = base_prompt.trim_end().to_string();
    for block in [trend_block, memory_block].into_iter().flatten() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(BLOCK_SEPARATOR);
        }
        out.push_str(block);
    }
    out
}

/// Builds the backend message list: system prompt, prior history in order, then the current question.
pub fn build_messages<H>(system_prompt: &str, history: H, current_question: &str) -> Vec<ChatMessage>
where
    H: IntoIterator<Item = ChatMessage>,
{
    let mut messages = vec![ChatMessage::system(system_prompt)];
    messages.extend(history.into_iter().filter(|m| !m.content.trim().is_empty()));
    messages.push(ChatMessage::user(current_question));
    messages
}
