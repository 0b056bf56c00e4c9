//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check lookup and expiration behavior over generated inputs.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};

use crate::cache::{Cache, Clock, ManualClock};
use crate::config::{CacheConfig, ExpiryMode};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Values may be empty; an empty value is still a hit.
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

fn expiry_strategy() -> impl Strategy<Value = ExpiryMode> {
    prop_oneof![Just(ExpiryMode::Eager), Just(ExpiryMode::Lazy)]
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    /// Deadline as an offset in seconds from the clock's current instant
    PutTill { key: String, value: String, offset: i64 },
    Get { key: String },
    Advance { seconds: i64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        (key_strategy(), value_strategy(), -60i64..60)
            .prop_map(|(key, value, offset)| CacheOp::PutTill { key, value, offset }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        (0i64..30).prop_map(|seconds| CacheOp::Advance { seconds }),
    ]
}

fn manual_cache(expiry: ExpiryMode) -> (Cache<ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc::now());
    let cache = Cache::with_config(CacheConfig::with_expiry(expiry), clock.clone());
    (cache, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits, misses and expired removals match a count taken from the `get`
    // results over any operation sequence, in either expiry mode.
    #[test]
    fn prop_statistics_accuracy(
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
        expiry in expiry_strategy()
    ) {
        let (mut cache, clock) = manual_cache(expiry);
        let mut stored: HashSet<String> = HashSet::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_removed: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key.clone(), value);
                    stored.insert(key);
                }
                CacheOp::PutTill { key, value, offset } => {
                    cache.put_till(key.clone(), value, clock.now() + Duration::seconds(offset));
                    stored.insert(key);
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => {
                        expected_misses += 1;
                        if expiry == ExpiryMode::Eager && stored.remove(&key) {
                            expected_removed += 1;
                        }
                    }
                },
                CacheOp::Advance { seconds } => clock.advance(Duration::seconds(seconds)),
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.expired_removed, expected_removed, "Expired removals mismatch");
        prop_assert_eq!(stats.total_entries, stored.len(), "Total entries mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries disagree with len()");
    }

    // Storing a pair without a deadline and reading it back returns the same value.
    #[test]
    fn prop_put_then_get(key in key_strategy(), value in value_strategy()) {
        let mut cache = Cache::new();

        cache.put(key.clone(), value.clone());

        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // A deadline ahead of the clock keeps the entry readable; one at or behind it does not.
    #[test]
    fn prop_put_till_respects_deadline(
        key in key_strategy(),
        value in value_strategy(),
        offset in -3600i64..3600,
        expiry in expiry_strategy()
    ) {
        let (mut cache, clock) = manual_cache(expiry);

        cache.put_till(key.clone(), value.clone(), clock.now() + Duration::seconds(offset));

        let expected = if offset > 0 { Some(value) } else { None };
        prop_assert_eq!(cache.get(&key), expected);
    }

    // The last write to a key is the one that is read back.
    #[test]
    fn prop_last_write_wins(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (mut cache, clock) = manual_cache(ExpiryMode::Eager);

        cache.put_till(key.clone(), value1, clock.now() + Duration::seconds(1));
        cache.put(key.clone(), value2.clone());
        clock.advance(Duration::seconds(10));

        prop_assert_eq!(cache.get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1);
    }

    // Across any operation sequence, the cache agrees with a simple model and
    // keys() lists exactly the keys get() would find.
    #[test]
    fn prop_matches_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
        expiry in expiry_strategy()
    ) {
        let (mut cache, clock) = manual_cache(expiry);
        let mut model: HashMap<String, (String, Option<chrono::DateTime<Utc>>)> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key.clone(), value.clone());
                    model.insert(key, (value, None));
                }
                CacheOp::PutTill { key, value, offset } => {
                    let deadline = clock.now() + Duration::seconds(offset);
                    cache.put_till(key.clone(), value.clone(), deadline);
                    model.insert(key, (value, Some(deadline)));
                }
                CacheOp::Get { key } => {
                    let now = clock.now();
                    let expected = model.get(&key).and_then(|(value, deadline)| match deadline {
                        Some(deadline) if now >= *deadline => None,
                        _ => Some(value.clone()),
                    });
                    prop_assert_eq!(cache.get(&key), expected);
                }
                CacheOp::Advance { seconds } => {
                    clock.advance(Duration::seconds(seconds));
                }
            }
        }

        let now = clock.now();
        let expected_keys: HashSet<String> = model
            .iter()
            .filter(|(_, (_, deadline))| deadline.map_or(true, |d| now < d))
            .map(|(key, _)| key.clone())
            .collect();
        let keys = cache.keys();
        let actual_keys: HashSet<String> = keys.iter().cloned().collect();

        prop_assert_eq!(keys.len(), actual_keys.len(), "keys() returned duplicates");
        prop_assert_eq!(&actual_keys, &expected_keys);

        for key in &expected_keys {
            prop_assert!(cache.get(key).is_some(), "Listed key '{}' should be readable", key);
        }
    }

    // Purging never changes what reads observe.
    #[test]
    fn prop_purge_preserves_reads(
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let (mut cache, clock) = manual_cache(ExpiryMode::Lazy);
        let mut touched = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    touched.insert(key.clone());
                    cache.put(key, value);
                }
                CacheOp::PutTill { key, value, offset } => {
                    touched.insert(key.clone());
                    cache.put_till(key, value, clock.now() + Duration::seconds(offset));
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Advance { seconds } => clock.advance(Duration::seconds(seconds)),
            }
        }

        let before: Vec<Option<String>> = touched.iter().map(|k| cache.get(k)).collect();
        let stored = cache.len();
        let removed = cache.purge_expired();
        let after: Vec<Option<String>> = touched.iter().map(|k| cache.get(k)).collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(cache.len(), stored - removed);
        prop_assert_eq!(cache.keys().len(), cache.len());
    }
}
