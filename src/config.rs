//! Configuration Module
//!
//! Holds the settings a cache is constructed with. The crate never reads the
//! environment itself; embedders deserialize a `CacheConfig` from their own
//! configuration source or build one in code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Expiry Mode ==
/// What a read does with an entry it finds expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryMode {
    /// Remove the entry from storage as soon as a read sees it expired.
    #[default]
    Eager,
    /// Leave the entry stored and report it as absent until overwritten or purged.
    Lazy,
}

impl fmt::Display for ExpiryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryMode::Eager => write!(f, "eager"),
            ExpiryMode::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for ExpiryMode {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(ExpiryMode::Eager),
            "lazy" => Ok(ExpiryMode::Lazy),
            _ => Err(CacheError::InvalidExpiryMode(s.to_string())),
        }
    }
}

/// Cache configuration parameters.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Expiration handling on read
    pub expiry: ExpiryMode,
    /// Number of entries to preallocate room for
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Creates a config with the given expiry mode and no preallocation.
    pub fn with_expiry(expiry: ExpiryMode) -> Self {
        Self {
            expiry,
            ..Self::default()
        }
    }
}
