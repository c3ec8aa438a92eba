//! Structured reply parsing.
//!
//! The system prompt asks the model to answer as `{"reply": ..., "emotion": ...}`.
//! Models do not always comply, so parsing fails closed: anything that does not
//! yield a `reply` string is treated as plain text with a neutral mood.

use serde::Deserialize;

pub const NEUTRAL: &str = "neutral";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    /// Trimmed, lowercase mood label; `neutral` when absent.
    pub emotion: String,
}

#[derive(Deserialize)]
struct RawReply {
    reply: Option<String>,
    emotion: Option<String>,
}

fn normalize_emotion(raw: Option<&str>) -> String {
    raw.map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| NEUTRAL.to_string())
}

/// Parses the outermost `{...}` span of `raw` as a reply object.
pub fn parse_reply(raw: &str) -> ChatReply {
    let fallback = || ChatReply {
        reply: raw.trim().to_string(),
        emotion: NEUTRAL.to_string(),
    };
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return fallback();
    };
    if end <= start {
        return fallback();
    }
    match serde_json::from_str::<RawReply>(&raw[start..=end]) {
        Ok(RawReply {
            reply: Some(reply),
            emotion,
        }) => ChatReply {
            reply: reply.trim().to_string(),
            emotion: normalize_emotion(emotion.as_deref()),
        },
        Ok(_) => fallback(),
        Err(e) => {
            tracing::debug!(error = %e, "Reply is not structured JSON, using raw text");
            fallback()
        }
    }
}
