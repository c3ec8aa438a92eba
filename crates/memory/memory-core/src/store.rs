//! Memory storage trait.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

use super::types::{MemoryRecord, UserId};

/// Storage failure. Reads degrade to an empty collection; writes are logged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Corrupt memory document at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encode error: {0}")]
    Encode(String),
}

/// Why an append did not persist anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyText,
    MissingVector,
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Record persisted; `total` is the collection size afterwards.
    Stored { total: usize },
    Skipped(SkipReason),
}

impl AppendOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, AppendOutcome::Stored { .. })
    }
}

/// Returns the reason a record must not be stored, if any.
pub fn check_record(record: &MemoryRecord, expected_dimension: Option<usize>) -> Option<SkipReason> {
    if record.text.trim().is_empty() {
        return Some(SkipReason::EmptyText);
    }
    if record.vector.is_empty() {
        return Some(SkipReason::MissingVector);
    }
    match expected_dimension {
        Some(expected) if expected != record.vector.len() => Some(SkipReason::DimensionMismatch {
            expected,
            actual: record.vector.len(),
        }),
        _ => None,
    }
}

/// Per-user, append-only collection of [`MemoryRecord`]s.
///
/// Implementations must serialize appends for the same user so that concurrent
/// turns never lose records.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Appends one record. Blank text or a missing vector is a silent no-op
    /// reported as [`AppendOutcome::Skipped`].
    async fn append(&self, user: &UserId, record: MemoryRecord) -> Result<AppendOutcome, StoreError>;

    /// All records in append order. A missing collection is `Ok(vec![])`.
    async fn try_load(&self, user: &UserId) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Like [`MemoryStore::try_load`] but never fails: errors are logged and
    /// yield an empty collection.
    async fn load(&self, user: &UserId) -> Vec<MemoryRecord> {
        match self.try_load(user).await {
            Ok(records) => records,
            Err(e) => {
                error!(user = %user, error = %e, "Memory load failed, using empty collection");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryRole;

    #[test]
    fn test_check_record_blank_text() {
        let record = MemoryRecord::at(1, MemoryRole::User, "  \n", vec![1.0]);
        assert_eq!(check_record(&record, None), Some(SkipReason::EmptyText));
    }

    #[test]
    fn test_check_record_missing_vector() {
        let record = MemoryRecord::at(1, MemoryRole::User, "hello", vec![]);
        assert_eq!(check_record(&record, None), Some(SkipReason::MissingVector));
    }

    #[test]
    fn test_check_record_dimension() {
        let record = MemoryRecord::at(1, MemoryRole::User, "hello", vec![1.0, 2.0]);
        assert_eq!(check_record(&record, Some(2)), None);
        assert_eq!(
            check_record(&record, Some(3)),
            Some(SkipReason::DimensionMismatch { expected: 3, actual: 2 })
        );
    }
}
