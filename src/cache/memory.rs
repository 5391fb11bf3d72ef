use std::collections::HashMap;
use std::sync::Mutex;

use super::store::{CacheEntry, CacheStore};
use crate::error::{AxiomError, Result};

/// In-process cache with the same expiry semantics as [`super::FileCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| AxiomError::Other("memory cache lock poisoned".to_string()))
    }
}

impl CacheStore for MemoryCache {
    fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        self.lock()?.insert(key.to_string(), entry.clone());
        Ok(())
    }

    fn remove_entry(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }
}
