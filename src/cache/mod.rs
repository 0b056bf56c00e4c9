//! Cache Module
//!
//! Provides in-memory string storage with optional per-entry expiration.

mod clock;
mod entry;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::Cache;
