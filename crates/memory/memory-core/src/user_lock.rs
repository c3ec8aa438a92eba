//! Per-user exclusive access for read-modify-write on user-scoped documents.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::types::UserId;

/// Lazily created async mutex per [`UserId`]. Cloning shares the map.
///
/// Entries are never removed; the map grows with the number of distinct users.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `user`'s documents.
    pub async fn lock(&self, user: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(user.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
