use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::store::{CacheEntry, CacheStore, validate_key};
use crate::error::{AxiomError, Result};
use crate::utils::permissions::{create_private_dir, create_private_file};

/// Overrides the default cache root.
pub const CACHE_DIR_ENV: &str = "AXIOM_CACHE_DIR";

/// `$AXIOM_CACHE_DIR`, falling back to `~/.axiom/cache`.
pub fn default_cache_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".axiom").join("cache"))
        .ok_or_else(|| AxiomError::Other("Could not find home directory".to_string()))
}

/// Disk-backed cache: one JSON file per key under a root directory.
///
/// There is no locking; concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache rooted at [`default_cache_dir`].
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_cache_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl CacheStore for FileCache {
    fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let path = self.entry_path(key)?;
        if !self.root.exists() {
            debug!(root = %self.root.display(), "creating cache directory");
            create_private_dir(&self.root)?;
        }

        let mut file = create_private_file(&path)?;
        file.write_all(serde_json::to_string(entry)?.as_bytes())?;
        Ok(())
    }

    fn remove_entry(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
