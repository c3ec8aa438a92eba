//! # Memory core
//!
//! Types and traits shared by every memory store: [`MemoryRecord`], the
//! sanitized [`UserId`] partition key, the [`MemoryStore`] trait, cosine
//! similarity, and the per-user single-writer lock map.

pub mod inmemory;
pub mod similarity;
pub mod store;
pub mod types;
pub mod user_lock;

pub use inmemory::InMemoryMemoryStore;
pub use similarity::cosine_similarity;
pub use store::{check_record, AppendOutcome, MemoryStore, SkipReason, StoreError};
pub use types::{sanitize_component, InvalidUserId, MemoryRecord, MemoryRole, UserId};
pub use user_lock::UserLocks;
