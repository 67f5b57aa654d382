//! Memoizing Cache Module
//!
//! Single-slot memoizing cache. The slot is one atomically replaceable
//! reference to an immutable `CacheEntry`; the computation itself never runs
//! under a lock.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats};

// == Publish Policy ==
/// How a miss publishes its freshly computed entry when other callers race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishPolicy {
    /// Unconditionally replace the slot. Last publish wins.
    #[default]
    Overwrite,
    /// Replace the slot only if it still holds the entry observed before
    /// computing. A racing publisher that got there first keeps the slot.
    IfUnchanged,
}

impl PublishPolicy {
    /// Parses a policy name as used in configuration (`overwrite`, `if-unchanged`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Some(Self::Overwrite),
            "if-unchanged" | "if_unchanged" => Some(Self::IfUnchanged),
            _ => None,
        }
    }
}

impl fmt::Display for PublishPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::IfUnchanged => f.write_str("if-unchanged"),
        }
    }
}

// == Lookup ==
/// Whether a call was answered from the cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit,
    Miss,
}

/// A value returned by the cache together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<V> {
    pub value: V,
    pub lookup: Lookup,
}

impl<V> Resolved<V> {
    pub fn is_hit(&self) -> bool {
        self.lookup == Lookup::Hit
    }
}

// == Memoizing Cache ==
/// Caches the most recent (input, output) pair of an expensive pure function.
///
/// The only synchronization points are the slot load and the slot publish,
/// both single atomic pointer operations with acquire/release semantics, so
/// every reader that sees an entry sees it fully built. Concurrent misses
/// compute in parallel; they only race on which entry ends up in the slot.
pub struct MemoizingCache<K, V> {
    /// Current entry, or `None` before the first successful computation
    slot: ArcSwapOption<CacheEntry<K, V>>,
    /// Performance counters
    stats: CacheStats,
    /// Tie-break for racing publishers
    policy: PublishPolicy,
}

impl<K, V> MemoizingCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache using [`PublishPolicy::Overwrite`].
    pub fn new() -> Self {
        Self::with_policy(PublishPolicy::default())
    }

    /// Creates an empty cache using the given publish policy.
    pub fn with_policy(policy: PublishPolicy) -> Self {
        Self {
            slot: ArcSwapOption::empty(),
            stats: CacheStats::new(),
            policy,
        }
    }

    pub fn policy(&self) -> PublishPolicy {
        self.policy
    }

    /// Returns true until the first successful computation is published.
    pub fn is_empty(&self) -> bool {
        self.slot.load().is_none()
    }

    /// Returns the key of the currently cached entry, if any.
    pub fn cached_key(&self) -> Option<K>
    where
        K: Clone,
    {
        self.slot.load().as_deref().map(|entry| entry.key().clone())
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn hits(&self) -> u64 {
        self.stats.hits()
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses()
    }

    pub fn attempts(&self) -> u64 {
        self.stats.attempts()
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats.hit_ratio()
    }
}

impl<K, V> MemoizingCache<K, V>
where
    K: PartialEq,
    V: Clone,
{
    // == Get Or Compute ==
    /// Returns a copy of the output for `key`, computing it on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_resolve(key, |k| Ok::<V, std::convert::Infallible>(compute(k))) {
            Ok(resolved) => resolved.value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// If `compute` fails the error is returned unchanged and the slot keeps
    /// whatever entry it held before.
    pub fn try_get_or_compute<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        self.try_resolve(key, compute).map(|resolved| resolved.value)
    }

    // == Resolve ==
    /// Like [`try_get_or_compute`](Self::try_get_or_compute), also reporting
    /// whether the value came from the cached entry.
    pub fn try_resolve<F, E>(&self, key: K, compute: F) -> Result<Resolved<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        let observed = self.slot.load_full();
        self.stats.record_attempt();

        if let Some(entry) = observed.as_deref() {
            if entry.matches(&key) {
                self.stats.record_hit();
                debug!("cache hit");
                return Ok(Resolved {
                    value: entry.output_copy(),
                    lookup: Lookup::Hit,
                });
            }
        }

        self.stats.record_miss();
        debug!("cache miss, computing");

        let value = match compute(&key) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_failure();
                warn!("computation failed, cached entry left untouched");
                return Err(err);
            }
        };

        let entry = Arc::new(CacheEntry::new(key, value));
        let value = entry.output_copy();
        self.publish(observed, entry);

        Ok(Resolved {
            value,
            lookup: Lookup::Miss,
        })
    }

    // == Publish ==
    /// Installs a fully built entry with a single atomic store or swap.
    fn publish(&self, observed: Option<Arc<CacheEntry<K, V>>>, entry: Arc<CacheEntry<K, V>>) {
        match self.policy {
            PublishPolicy::Overwrite => {
                self.slot.store(Some(entry));
                debug!("published new cache entry");
            }
            PublishPolicy::IfUnchanged => {
                let previous = self.slot.compare_and_swap(&observed, Some(entry));
                let won = match (&*previous, &observed) {
                    (Some(prev), Some(seen)) => Arc::ptr_eq(prev, seen),
                    (None, None) => true,
                    _ => false,
                };
                if won {
                    debug!("published new cache entry");
                } else {
                    debug!("slot changed while computing, keeping the racing entry");
                }
            }
        }
    }
}

impl<K, V> Default for MemoizingCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoizingCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizingCache")
            .field("populated", &!self.is_empty())
            .field("stats", &self.stats)
            .field("policy", &self.policy)
            .finish()
    }
}
