//! # Core Types
//!
//! ## MemoryRole
//!
//! Who produced the remembered text: `User` or `Assistant`.
//!
//! ## MemoryRecord
//!
//! A single remembered turn with its embedding vector. Serialized as
//! `{"ts", "role", "text", "vector"}`.
//!
//! ## UserId
//!
//! Sanitized partition key. Only letters, digits, `-` and `_` survive, so an id
//! can be used directly as a file or directory name.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the role of a remembered message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemoryRole {
    User,
    Assistant,
}

impl MemoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryRole::User => "user",
            MemoryRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MemoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remembered turn. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Unix seconds.
    #[serde(rename = "ts")]
    pub timestamp: i64,
    pub role: MemoryRole,
    pub text: String,
    /// Empty when no embedding was available; such records are never stored.
    #[serde(default)]
    pub vector: Vec<f32>,
}

impl MemoryRecord {
    /// Record stamped with the current time.
    pub fn new(role: MemoryRole, text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self::at(Utc::now().timestamp(), role, text, vector)
    }

    pub fn at(timestamp: i64, role: MemoryRole, text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            timestamp,
            role,
            text: text.into(),
            vector,
        }
    }

    /// Builds a record from an optional embedding; `None` yields an empty vector,
    /// which every store skips.
    pub fn with_embedding(role: MemoryRole, text: impl Into<String>, vector: Option<Vec<f32>>) -> Self {
        Self::new(role, text, vector.unwrap_or_default())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("user id {raw:?} has no allowed characters (letters, digits, '-', '_')")]
pub struct InvalidUserId {
    pub raw: String,
}

/// Sanitized user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Drops every character outside the allow-list. Fails when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        let safe = sanitize_component(raw);
        if safe.is_empty() {
            return Err(InvalidUserId { raw: raw.to_string() });
        }
        Ok(Self(safe))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keeps letters, digits, `-` and `_`. Also used for session ids.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_keeps_allowed_characters() {
        let id = UserId::parse("alice_01-x").unwrap();
        assert_eq!(id.as_str(), "alice_01-x");
    }

    #[test]
    fn test_user_id_strips_traversal() {
        assert_eq!(UserId::parse("../alice").unwrap().as_str(), "alice");
        assert_eq!(UserId::parse("a/l.i\\ce").unwrap().as_str(), "alice");
        assert_eq!(UserId::parse("bob 42!").unwrap().as_str(), "bob42");
    }

    #[test]
    fn test_user_id_keeps_unicode_letters() {
        assert_eq!(UserId::parse("Thắng").unwrap().as_str(), "Thắng");
    }

    #[test]
    fn test_user_id_rejects_empty_after_sanitizing() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("../..").is_err());
    }

    #[test]
    fn test_record_serializes_with_short_field_names() {
        let record = MemoryRecord::at(42, MemoryRole::Assistant, "hi", vec![1.0]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ts"], 42);
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn test_with_embedding_none_gives_empty_vector() {
        let record = MemoryRecord::with_embedding(MemoryRole::User, "hi", None);
        assert!(record.vector.is_empty());
    }
}
