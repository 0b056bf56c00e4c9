//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an optional deadline.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single cache entry with value and expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn new(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires at `deadline`.
    pub fn with_deadline(value: String, deadline: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: Some(deadline),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches the deadline,
    /// so it is live only while `now` is strictly before it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Expire ==
    /// Pins the entry as expired at every instant, earlier ones included.
    ///
    /// Once a read has seen the entry expired it must stay dead even if the
    /// clock later reports an earlier time.
    pub fn expire(&mut self) {
        self.expires_at = Some(DateTime::<Utc>::MIN_UTC);
    }

    /// Negation of [`is_expired_at`](Self::is_expired_at).
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }

    // == Time To Live ==
    /// Returns the time left before expiry as of `now`.
    ///
    /// # Returns
    /// - `Some(Duration::zero())` if the entry has expired
    /// - `Some(remaining)` if the entry has a deadline still ahead
    /// - `None` if the entry never expires
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at.map(|deadline| {
            if deadline > now {
                deadline - now
            } else {
                Duration::zero()
            }
        })
    }
}
