//! # Session transcripts
//!
//! One JSON document per chat session under `{root}/{user}/{id}.json`. The trend
//! analyzer only reads committed documents; writes go through a temporary file
//! and an atomic rename under the user's lock.

mod store;
mod types;

pub use store::{ensure_session_id, JsonSessionStore, SessionStore};
pub use types::{SessionTranscript, SessionTurn, DEFAULT_TITLE, TITLE_MAX_CHARS};
