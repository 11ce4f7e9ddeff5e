//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists API responses to the
//! filesystem with per-entry TTL (time-to-live) values in seconds. Reads of
//! expired entries are flagged with `is_expired`; the API clients treat such
//! entries as cache misses and refetch.

mod manager;

pub use manager::{CacheManager, CachedData};
