//! Error types for the cache
//!
//! Lookups and plain writes never fail; absence is reported as `None`.
//! These variants cover the fallible helpers around them.

use chrono::Duration;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// `now + ttl` does not fit in a timestamp
    #[error("Deadline out of range for key {key}: ttl {ttl}")]
    DeadlineOutOfRange { key: String, ttl: Duration },

    /// Unrecognized expiry mode name
    #[error("Invalid expiry mode: {0}")]
    InvalidExpiryMode(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
