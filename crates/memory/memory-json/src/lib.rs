//! # JSON memory store
//!
//! Persists each user's memory as `{root}/{user}.json`, a JSON array of
//! [`memory_core::MemoryRecord`]. Appends load the whole collection, push, and
//! rewrite it through a temporary file and an atomic rename, all under the
//! user's exclusive lock.
//!
//! Retrieval rescans the full collection; this is intended for per-user
//! histories of at most a few thousand records.

mod atomic;
mod store;

pub use atomic::{quarantine_corrupt, read_json_opt, write_json_atomic};
pub use store::JsonMemoryStore;
