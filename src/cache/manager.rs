//! Cache manager for persisting API responses to disk
//!
//! Provides a `CacheManager` that stores serializable data to JSON files with
//! expiry timestamps. Entries carry a per-write TTL in seconds; reads report
//! expiry via an `is_expired` flag and callers treat expired entries as
//! misses.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    #[allow(dead_code)]
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Manages reading and writing cached API responses to disk
///
/// Stores data as JSON files in an XDG-compliant cache directory
/// (`~/.cache/nutrifetch/` on Linux). Keys are sanitized to filesystem-safe
/// characters, so query-derived keys ("fatsecret_search_chicken breast") map
/// to stable file names. Expired entries are still returned (with
/// `is_expired = true`); call sites decide what staleness means for them.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "nutrifetch")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced with `_` so that
    /// arbitrary query strings produce valid file names.
    fn cache_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{}.json", safe))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache with a TTL (time-to-live) in seconds
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "fatsecret_search_apple")
    /// * `data` - The data to cache (must implement Serialize)
    /// * `ttl_seconds` - How long the cache entry should be considered fresh
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn write<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl_seconds: u64,
    ) -> std::io::Result<()> {
        self.ensure_dir()?;

        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the cache entry doesn't exist or cannot be parsed.
    /// Returns `Some(CachedData)` with `is_expired = true` if the entry
    /// exists but its TTL has elapsed; callers treat such entries as misses.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(path).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        let now = Utc::now();
        let is_expired = now > entry.expires_at;

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
            is_expired,
        })
    }
}
