//! In-memory implementation of the MemoryStore trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::store::{check_record, AppendOutcome, MemoryStore, StoreError};
use super::types::{MemoryRecord, UserId};

type RecordMap = HashMap<UserId, Vec<MemoryRecord>>;

/// In-memory store for tests and ephemeral runs. The write lock serializes appends.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemoryStore {
    records: Arc<RwLock<RecordMap>>,
    dimension: Option<usize>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Total records across all users.
    pub async fn len(&self) -> usize {
        self.records.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MemoryStore for InMemoryMemoryStore {
    async fn append(&self, user: &UserId, record: MemoryRecord) -> Result<AppendOutcome, StoreError> {
        if let Some(reason) = check_record(&record, self.dimension) {
            debug!(user = %user, ?reason, "In-memory store append skipped");
            return Ok(AppendOutcome::Skipped(reason));
        }
        let mut records = self.records.write().await;
        let list = records.entry(user.clone()).or_default();
        list.push(record);
        let total = list.len();
        info!(user = %user, total, "Record written to in-memory store");
        Ok(AppendOutcome::Stored { total })
    }

    async fn try_load(&self, user: &UserId) -> Result<Vec<MemoryRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(user).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SkipReason;
    use crate::types::MemoryRole;

    fn user(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_load_in_order() {
        let store = InMemoryMemoryStore::new();
        let alice = user("alice");
        store
            .append(&alice, MemoryRecord::at(1, MemoryRole::User, "first", vec![1.0]))
            .await
            .unwrap();
        let outcome = store
            .append(&alice, MemoryRecord::at(2, MemoryRole::Assistant, "second", vec![0.5]))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::Stored { total: 2 });
        let texts: Vec<String> = store.load(&alice).await.into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_vector_is_skipped() {
        let store = InMemoryMemoryStore::new();
        let outcome = store
            .append(&user("alice"), MemoryRecord::at(1, MemoryRole::User, "hi", vec![]))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::Skipped(SkipReason::MissingVector));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryMemoryStore::new();
        store
            .append(&user("alice"), MemoryRecord::at(1, MemoryRole::User, "secret", vec![1.0]))
            .await
            .unwrap();
        assert!(store.load(&user("bob")).await.is_empty());
        assert_eq!(store.len().await, 1);
    }
}
