//! Cache Entry Module
//!
//! Defines the immutable (input, output) pair held by the memoizing cache.

// == Cache Entry ==
/// A completed computation: the input key and the output it produced.
///
/// Fields are private and there is no setter, so once built an entry can be
/// shared across threads behind an `Arc` with no further synchronization.
/// Updating the cache always means building a new entry.
#[derive(Debug)]
pub struct CacheEntry<K, V> {
    /// The input the value was computed for
    key: K,
    /// The computed output
    value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry, taking ownership of both key and value.
    ///
    /// Callers hand over the computed value, so no alias to the stored
    /// output survives outside the entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    // == Key ==
    /// Returns the key this entry was computed for.
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: PartialEq, V> CacheEntry<K, V> {
    // == Matches ==
    /// Returns true if this entry holds the output for `candidate`.
    pub fn matches(&self, candidate: &K) -> bool {
        self.key == *candidate
    }
}

impl<K, V: Clone> CacheEntry<K, V> {
    // == Output Copy ==
    /// Returns an independent copy of the stored output.
    ///
    /// Mutating the returned value never affects the entry or any other
    /// caller's copy.
    pub fn output_copy(&self) -> V {
        self.value.clone()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_matches_own_key() {
        let entry = CacheEntry::new(12u64, vec![2u64, 2, 3]);

        assert!(entry.matches(&12));
        assert!(!entry.matches(&13));
        assert_eq!(*entry.key(), 12);
    }

    #[test]
    fn test_output_copy_is_independent() {
        let entry = CacheEntry::new(12u64, vec![2u64, 2, 3]);

        let mut copy = entry.output_copy();
        copy.push(99);
        copy[0] = 7;

        assert_eq!(entry.output_copy(), vec![2, 2, 3]);
    }

    #[test]
    fn test_entry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CacheEntry<u64, Vec<u64>>>();
        assert_send_sync::<CacheEntry<String, String>>();
    }
}
