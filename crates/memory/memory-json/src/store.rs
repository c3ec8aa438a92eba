//! [`JsonMemoryStore`]: file-per-user implementation of [`MemoryStore`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use memory_core::{
    check_record, AppendOutcome, MemoryRecord, MemoryStore, StoreError, UserId, UserLocks,
};
use tracing::{debug, error, info};

use super::atomic::{quarantine_corrupt, read_json_opt, write_json_atomic};

#[derive(Debug, Clone)]
pub struct JsonMemoryStore {
    root: PathBuf,
    locks: UserLocks,
    dimension: Option<usize>,
}

impl JsonMemoryStore {
    /// Store rooted at `root` (e.g. `./data/memories`). The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: UserLocks::new(),
            dimension: None,
        }
    }

    /// Rejects records whose vector length differs from `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn with_dimension_opt(mut self, dimension: Option<usize>) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, user: &UserId) -> PathBuf {
        self.root.join(format!("{}.json", user))
    }

    async fn read_records(path: &Path) -> Result<Vec<MemoryRecord>, StoreError> {
        Ok(read_json_opt(path).await?.unwrap_or_default())
    }

}

#[async_trait]
impl MemoryStore for JsonMemoryStore {
    async fn append(&self, user: &UserId, record: MemoryRecord) -> Result<AppendOutcome, StoreError> {
        if let Some(reason) = check_record(&record, self.dimension) {
            debug!(user = %user, ?reason, "Memory append skipped");
            return Ok(AppendOutcome::Skipped(reason));
        }
        let path = self.path_for(user);
        let _guard = self.locks.lock(user).await;

        let mut records = match Self::read_records(&path).await {
            Ok(records) => records,
            Err(e @ StoreError::Corrupt { .. }) => {
                let moved = quarantine_corrupt(&path).await?;
                error!(user = %user, error = %e, moved_to = %moved.display(), "Corrupt memory document moved aside, starting a new collection");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        records.push(record);
        write_json_atomic(&path, &records).await?;
        let total = records.len();
        info!(user = %user, role = %records[total - 1].role, dimension = records[total - 1].vector.len(), total, "step: memory record appended");
        Ok(AppendOutcome::Stored { total })
    }

    async fn try_load(&self, user: &UserId) -> Result<Vec<MemoryRecord>, StoreError> {
        let records = Self::read_records(&self.path_for(user)).await?;
        debug!(user = %user, count = records.len(), "Memory collection loaded");
        Ok(records)
    }
}
