//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries checked against a clock on every read.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};
use crate::config::{CacheConfig, ExpiryMode};
use crate::error::{CacheError, Result};

// == Cache ==
/// String cache with optional per-entry deadlines.
///
/// Not synchronized; wrap it in [`SharedCache`](crate::cache::SharedCache)
/// to use it from several threads.
#[derive(Debug)]
pub struct Cache<C: Clock = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Source of `now` for expiration checks
    clock: C,
    /// What reads do with expired entries
    expiry: ExpiryMode,
    /// Lookup statistics
    stats: CacheStats,
}

impl Cache<SystemClock> {
    // == Constructor ==
    /// Creates an empty cache on the system clock with eager expiry.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Cache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Cache<C> {
    // == With Clock ==
    /// Creates an empty cache with default config on the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(CacheConfig::default(), clock)
    }

    // == With Config ==
    /// Creates an empty cache from `config` on the given clock.
    pub fn with_config(config: CacheConfig, clock: C) -> Self {
        trace!(
            "Creating cache: expiry={}, initial_capacity={}",
            config.expiry,
            config.initial_capacity
        );
        Self {
            entries: HashMap::with_capacity(config.initial_capacity),
            clock,
            expiry: config.expiry,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a value that never expires.
    ///
    /// Overwrites any existing entry for `key`, including its deadline.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!("put key={}", key);
        self.entries.insert(key, CacheEntry::new(value.into()));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Put Till ==
    /// Stores a value that expires at `deadline`.
    ///
    /// A deadline at or before the current time is accepted; the entry is
    /// simply dead on the next read.
    pub fn put_till(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        deadline: DateTime<Utc>,
    ) {
        let key = key.into();
        trace!("put_till key={} deadline={}", key, deadline);
        self.entries
            .insert(key, CacheEntry::with_deadline(value.into(), deadline));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Put For ==
    /// Stores a value that expires `ttl` after the current time.
    ///
    /// # Errors
    /// `CacheError::DeadlineOutOfRange` if `now + ttl` overflows; nothing is stored.
    pub fn put_for(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Result<()> {
        let key = key.into();
        let deadline = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| CacheError::DeadlineOutOfRange {
                key: key.clone(),
                ttl,
            })?;
        self.put_till(key, value, deadline);
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or its deadline has been reached.
    /// In eager mode an expired entry is removed as it is found; in lazy mode
    /// it is pinned as expired so a clock stepping backwards cannot revive it.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now();

        let expired = match self.entries.get_mut(key) {
            Some(entry) if entry.is_live_at(now) => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(entry) => {
                entry.expire();
                true
            }
            None => false,
        };

        if expired && self.expiry == ExpiryMode::Eager {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.set_total_entries(self.entries.len());
            debug!("Removed expired key on read: {}", key);
        }

        self.stats.record_miss();
        None
    }

    // == Keys ==
    /// Returns every live key, in no particular order.
    ///
    /// Uses the same liveness test as [`get`](Self::get) with a single `now`
    /// for the whole scan. In eager mode expired entries are dropped along the
    /// way; in lazy mode they are pinned as expired.
    pub fn keys(&mut self) -> Vec<String> {
        let now = self.clock.now();

        if self.expiry == ExpiryMode::Eager {
            self.remove_expired_at(now);
        }

        self.entries
            .iter_mut()
            .filter_map(|(key, entry)| {
                if entry.is_live_at(now) {
                    Some(key.clone())
                } else {
                    entry.expire();
                    None
                }
            })
            .collect()
    }

    // == Purge Expired ==
    /// Removes all expired entries from storage.
    ///
    /// Returns the number of entries removed. Never changes what a read observes.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.remove_expired_at(now)
    }

    fn remove_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live_at(now));
        let removed = before - self.entries.len();

        if removed > 0 {
            self.stats.record_expired(removed);
            self.stats.set_total_entries(self.entries.len());
            debug!("Removed {} expired entries", removed);
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Expiry Mode ==
    /// Returns how reads treat expired entries.
    pub fn expiry_mode(&self) -> ExpiryMode {
        self.expiry
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored, live or not.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
