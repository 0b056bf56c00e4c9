//! Shared Cache Module
//!
//! Thread-safe handle over a [`Cache`], one lock held per operation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::cache::{Cache, CacheStats, Clock, SystemClock};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable, lock-guarded cache handle.
///
/// Every method locks the whole cache for the duration of the call. Reads
/// take the same lock as writes because an eager read may remove an entry.
#[derive(Debug)]
pub struct SharedCache<C: Clock = SystemClock> {
    inner: Arc<Mutex<Cache<C>>>,
}

impl<C: Clock> Clone for SharedCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedCache<SystemClock> {
    // == Constructor ==
    /// Creates an empty shared cache on the system clock with eager expiry.
    pub fn new() -> Self {
        Self::from_cache(Cache::new())
    }
}

impl Default for SharedCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SharedCache<C> {
    // == From Cache ==
    /// Wraps an existing cache, keeping its clock and expiry mode.
    pub fn from_cache(cache: Cache<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Put ==
    /// Stores a value that never expires. See [`Cache::put`].
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().put(key, value);
    }

    // == Put Till ==
    /// Stores a value that expires at `deadline`. See [`Cache::put_till`].
    pub fn put_till(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        deadline: DateTime<Utc>,
    ) {
        self.inner.lock().put_till(key, value, deadline);
    }

    // == Put For ==
    /// Stores a value that expires `ttl` from now. See [`Cache::put_for`].
    pub fn put_for(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Result<()> {
        self.inner.lock().put_for(key, value, ttl)
    }

    // == Get ==
    /// Retrieves a live value by key. See [`Cache::get`].
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key)
    }

    // == Keys ==
    /// Returns every live key, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored, live or not.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
