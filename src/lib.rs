//! TTL Cache - A small in-process string cache
//!
//! Stores string values under string keys, optionally with an absolute
//! deadline after which reads stop returning them.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, Clock, ManualClock, SharedCache, SystemClock};
pub use config::{CacheConfig, ExpiryMode};
pub use error::{CacheError, Result};
