//! In-process store, used by tests and as a cache-less fallback.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{LocalStore, StoreError, StoreKey, StoreResult};

/// Thread-safe in-memory store.
///
/// Clones share the same backing map, so a test can keep a handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<StoreKey, String>>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, mirroring a preference file that
    /// could not be opened.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable {
            Err(StoreError::Unavailable("store not initialized".to_string()))
        } else {
            Ok(())
        }
    }
}

impl LocalStore for MemoryStore {
    async fn get(&self, key: StoreKey) -> StoreResult<Option<String>> {
        self.check()?;
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn put(&self, key: StoreKey, value: &str) -> StoreResult<()> {
        self.check()?;
        self.entries.lock().await.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: StoreKey) -> StoreResult<()> {
        self.check()?;
        self.entries.lock().await.remove(&key);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.check()?;
        self.entries.lock().await.clear();
        Ok(())
    }
}
