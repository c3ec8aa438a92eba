//! Session transcript storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use memory_core::{sanitize_component, StoreError, UserId, UserLocks};
use memory_json::{quarantine_corrupt, read_json_opt, write_json_atomic};
use tracing::{debug, error, info, warn};

use super::types::{SessionTranscript, SessionTurn};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All readable transcripts of `user`, most recently updated first.
    /// Unreadable documents are skipped.
    async fn list(&self, user: &UserId) -> Vec<SessionTranscript>;

    async fn load(&self, user: &UserId, session_id: &str) -> Result<Option<SessionTranscript>, StoreError>;

    /// Writes the transcript, stamping `updated` and deriving the title.
    async fn save(&self, user: &UserId, transcript: SessionTranscript) -> Result<SessionTranscript, StoreError>;

    /// Appends turns to a session (creating it if needed) as one locked read-modify-write.
    async fn append_turns(
        &self,
        user: &UserId,
        session_id: &str,
        turns: Vec<SessionTurn>,
    ) -> Result<SessionTranscript, StoreError>;
}

/// Returns a sanitized session id, or a fresh UUID when none (or nothing safe) was given.
pub fn ensure_session_id(raw: Option<&str>) -> String {
    raw.map(sanitize_component)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    root: PathBuf,
    locks: UserLocks,
}

impl JsonSessionStore {
    /// Store rooted at `root` (e.g. `./data/sessions`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: UserLocks::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join(user.as_str())
    }

    pub fn path_for(&self, user: &UserId, session_id: &str) -> PathBuf {
        self.user_dir(user)
            .join(format!("{}.json", ensure_session_id(Some(session_id))))
    }

    async fn write(&self, user: &UserId, mut transcript: SessionTranscript) -> Result<SessionTranscript, StoreError> {
        transcript.id = ensure_session_id(Some(&transcript.id));
        transcript.title = SessionTranscript::derive_title(&transcript.turns);
        transcript.updated = Utc::now().timestamp();
        write_json_atomic(&self.path_for(user, &transcript.id), &transcript).await?;
        info!(user = %user, session_id = %transcript.id, turns = transcript.turns.len(), "Session saved");
        Ok(transcript)
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn list(&self, user: &UserId) -> Vec<SessionTranscript> {
        let dir = self.user_dir(user);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(user = %user, error = %e, "Session directory unreadable");
                return Vec::new();
            }
        };
        let mut transcripts = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(user = %user, error = %e, "Session directory listing interrupted");
                    break;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json_opt::<SessionTranscript>(&path).await {
                Ok(Some(transcript)) => transcripts.push(transcript),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable session"),
            }
        }
        transcripts.sort_by(|a, b| b.updated.cmp(&a.updated));
        debug!(user = %user, count = transcripts.len(), "Sessions listed");
        transcripts
    }

    async fn load(&self, user: &UserId, session_id: &str) -> Result<Option<SessionTranscript>, StoreError> {
        read_json_opt(&self.path_for(user, session_id)).await
    }

    async fn save(&self, user: &UserId, transcript: SessionTranscript) -> Result<SessionTranscript, StoreError> {
        let _guard = self.locks.lock(user).await;
        self.write(user, transcript).await
    }

    async fn append_turns(
        &self,
        user: &UserId,
        session_id: &str,
        turns: Vec<SessionTurn>,
    ) -> Result<SessionTranscript, StoreError> {
        let session_id = ensure_session_id(Some(session_id));
        let path = self.path_for(user, &session_id);
        let _guard = self.locks.lock(user).await;
        let mut transcript = match read_json_opt(&path).await {
            Ok(Some(existing)) => existing,
            Ok(None) => SessionTranscript::new(session_id.clone()),
            Err(e @ StoreError::Corrupt { .. }) => {
                let moved = quarantine_corrupt(&path).await?;
                error!(user = %user, session_id = %session_id, error = %e, moved_to = %moved.display(), "Corrupt session moved aside, starting a new transcript");
                SessionTranscript::new(session_id.clone())
            }
            Err(e) => return Err(e),
        };
        transcript.turns.extend(turns);
        self.write(user, transcript).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_session_id_sanitizes() {
        assert_eq!(ensure_session_id(Some("../abc-1")), "abc-1");
    }

    #[test]
    fn test_ensure_session_id_generates_when_missing() {
        let id = ensure_session_id(None);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        let id = ensure_session_id(Some("///"));
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
