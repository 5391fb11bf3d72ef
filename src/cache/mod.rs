//! Named, optionally expiring blobs persisted between CLI invocations.
//!
//! Entries are stored as `{ "expires": <RFC 3339>?, "data": <value> }`. An
//! entry without `expires` never expires; an expired entry is deleted the
//! first time it is read and reported as absent.

mod file;
mod memory;
mod store;

pub use file::{CACHE_DIR_ENV, FileCache, default_cache_dir};
pub use memory::MemoryCache;
pub use store::{CacheEntry, CacheStore};
