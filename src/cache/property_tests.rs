//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the memoizing cache against a sequential model and
//! under concurrent callers.

use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

use crate::cache::{Lookup, MemoizingCache, PublishPolicy};
use crate::factor::{factorize, FactorError};

// == Strategies ==
/// Small key space so repeated keys (hits) are common; 0 always fails.
fn key_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        8 => 1u64..12,
        1 => Just(0u64),
        1 => 1_000u64..1_000_000,
    ]
}

fn policy_strategy() -> impl Strategy<Value = PublishPolicy> {
    prop_oneof![
        Just(PublishPolicy::Overwrite),
        Just(PublishPolicy::IfUnchanged),
    ]
}

/// Output whose parts all derive from the key, so a value mixing two
/// computations is detectable.
fn tagged(key: u64) -> (u64, Vec<u64>, u64) {
    (key, factorize(key.max(1)).unwrap_or_default(), key.wrapping_mul(31))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A single caller sees exactly the behavior of a one-slot model: a hit
    // iff the key equals the last successfully computed key.
    #[test]
    fn prop_matches_sequential_model(
        keys in prop::collection::vec(key_strategy(), 1..60),
        policy in policy_strategy(),
    ) {
        let cache = MemoizingCache::with_policy(policy);
        let mut last_ok: Option<u64> = None;
        let (mut hits, mut misses, mut failures) = (0u64, 0u64, 0u64);

        for key in keys {
            let result = cache.try_resolve(key, |&n| factorize(n));
            match result {
                Ok(resolved) => {
                    let expected_hit = last_ok == Some(key);
                    prop_assert_eq!(resolved.lookup == Lookup::Hit, expected_hit);
                    prop_assert_eq!(resolved.value, factorize(key).unwrap());
                    if expected_hit { hits += 1 } else { misses += 1 }
                    last_ok = Some(key);
                }
                Err(err) => {
                    prop_assert_eq!(key, 0);
                    prop_assert_eq!(err, FactorError::Zero);
                    misses += 1;
                    failures += 1;
                }
            }
            prop_assert_eq!(cache.cached_key(), last_ok);
        }

        let stats = cache.stats().snapshot();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.failures, failures);
        prop_assert_eq!(stats.hits + stats.misses, stats.attempts);
    }

    // Whatever a caller does to its returned copy, the next lookup for the
    // same key returns the original output.
    #[test]
    fn prop_returned_copy_mutation_is_isolated(
        key in 1u64..1_000_000,
        junk in prop::collection::vec(any::<u64>(), 0..8),
    ) {
        let cache = MemoizingCache::new();

        let mut copy = cache.get_or_compute(key, |&n| factorize(n).unwrap());
        copy.clear();
        copy.extend(junk);

        let again = cache.try_resolve(key, |&n| factorize(n)).unwrap();
        prop_assert!(again.is_hit());
        prop_assert_eq!(again.value, factorize(key).unwrap());
    }

    // N identical calls after an empty start: one miss, N - 1 hits.
    #[test]
    fn prop_hit_ratio_for_repeated_key(key in 1u64..10_000, n in 1u64..50) {
        let cache = MemoizingCache::new();
        for _ in 0..n {
            cache.get_or_compute(key, |&k| factorize(k).unwrap());
        }
        prop_assert_eq!(cache.attempts(), n);
        prop_assert_eq!(cache.hits(), n - 1);
        let expected = (n - 1) as f64 / n as f64;
        prop_assert!((cache.hit_ratio() - expected).abs() < 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Under concurrent callers every returned value is the complete output of
    // some computation for the requested key, and counters add up once all
    // calls have finished.
    #[test]
    fn prop_concurrent_values_are_consistent(
        per_thread in prop::collection::vec(
            prop::collection::vec(0u64..6, 1..40),
            2..6,
        ),
        policy in policy_strategy(),
    ) {
        let cache = Arc::new(MemoizingCache::with_policy(policy));
        let total: usize = per_thread.iter().map(Vec::len).sum();

        let handles: Vec<_> = per_thread
            .into_iter()
            .map(|keys| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    keys.into_iter()
                        .map(|key| (key, cache.get_or_compute(key, |&k| tagged(k))))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for (key, value) in handle.join().unwrap() {
                prop_assert_eq!(value, tagged(key));
            }
        }

        prop_assert_eq!(cache.attempts(), total as u64);
        prop_assert_eq!(cache.hits() + cache.misses(), cache.attempts());
        prop_assert!(cache.cached_key().is_some());
    }
}
