use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AxiomError, Result};

/// The persisted form of a cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    pub data: serde_json::Value,
}

impl CacheEntry {
    /// Expired means `expires` is strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires < now)
    }
}

/// Key/value storage with optional expiry.
///
/// Backends implement the three raw entry primitives; the expiry rules live
/// in the provided methods so every backend behaves the same way.
pub trait CacheStore: Send + Sync {
    /// Read the raw entry, or `None` when the key has never been written.
    fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Write the entry, replacing whatever was stored under `key`.
    fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<()>;

    /// Remove the entry. Returns `false` if there was nothing to remove.
    fn remove_entry(&self, key: &str) -> Result<bool>;

    /// Fetch the data stored under `key`.
    ///
    /// Missing and expired keys both yield `Ok(None)`; an expired entry is
    /// removed as a side effect.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(entry) = self.read_entry(key)? else {
            return Ok(None);
        };

        if entry.is_expired(Utc::now()) {
            debug!(key, expires = ?entry.expires, "cache entry expired");
            self.delete_if_exists(key)?;
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(entry.data)?))
    }

    /// Store `value` under `key`, overwriting unconditionally.
    fn set<T: Serialize>(&self, key: &str, value: &T, expires: Option<DateTime<Utc>>) -> Result<()> {
        let entry = CacheEntry {
            expires,
            data: serde_json::to_value(value)?,
        };
        self.write_entry(key, &entry)
    }

    /// Remove `key`, failing with [`AxiomError::CacheEntryNotFound`] when
    /// there is no such entry.
    fn delete(&self, key: &str) -> Result<()> {
        if self.remove_entry(key)? {
            Ok(())
        } else {
            Err(AxiomError::CacheEntryNotFound(key.to_string()))
        }
    }

    /// Remove `key` if present. Returns whether an entry was removed.
    fn delete_if_exists(&self, key: &str) -> Result<bool> {
        self.remove_entry(key)
    }
}

/// Reject keys that would escape the cache root when used as a file name.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(AxiomError::validation(format!(
            "Invalid cache key '{}': keys cannot be empty or contain path separators",
            key
        )));
    }
    Ok(())
}
