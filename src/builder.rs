//! Validated cache configuration.
//!
//! [`CacheBuilder`] is a plain value consumed once by
//! [`try_build`](CacheBuilder::try_build); nothing is shared or mutated
//! after the cache exists. Validation happens in one place: a zero
//! `cache_size` is a [`ConfigError`], a concurrency below 1 is normalized
//! to 1.
//!
//! The total capacity is split across shards as evenly as integer division
//! allows, handing the remainder one unit at a time to the first shards so
//! the shard capacities always sum to exactly `cache_size`.
//!
//! ## Example
//!
//! ```
//! use shardlru::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new(1000)
//!     .concurrency(16)
//!     .update_existing(true)
//!     .try_build::<String, Vec<u8>>()
//!     .unwrap();
//!
//! assert_eq!(cache.capacity(), 1000);
//! assert_eq!(cache.shard_count(), 16);
//! ```

use std::hash::Hash;

use crate::cache::{LruCacheBase, LruPutCache};
use crate::error::ConfigError;

/// Configuration for a sharded LRU cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheBuilder {
    cache_size: usize,
    concurrency: usize,
    update_existing: bool,
    promote_on_duplicate: bool,
    shard_seed: u64,
}

impl CacheBuilder {
    /// Starts a configuration for a cache bounded to `cache_size` entries.
    ///
    /// Defaults: `concurrency = 1`, `update_existing = false`,
    /// `promote_on_duplicate = true`, `shard_seed = 0`.
    pub fn new(cache_size: usize) -> Self {
        Self {
            cache_size,
            concurrency: 1,
            update_existing: false,
            promote_on_duplicate: true,
            shard_seed: 0,
        }
    }

    /// Number of independently locked shards. Values below 1 are
    /// normalized to 1 at build time.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Whether a put on an existing key overwrites the stored value.
    pub fn update_existing(mut self, update_existing: bool) -> Self {
        self.update_existing = update_existing;
        self
    }

    /// Whether a put that hits an existing key without overwriting it
    /// still promotes the entry to MRU. Defaults to `true`: a put is
    /// evidence of recent relevance even when the value is unchanged.
    pub fn promote_on_duplicate(mut self, promote_on_duplicate: bool) -> Self {
        self.promote_on_duplicate = promote_on_duplicate;
        self
    }

    /// Seed for the key-to-shard hash, for callers that want distinct
    /// caches to spread the same keys differently.
    pub fn shard_seed(mut self, shard_seed: u64) -> Self {
        self.shard_seed = shard_seed;
        self
    }

    /// Validates the configuration and constructs the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `cache_size` is zero.
    pub fn try_build<K, V>(self) -> Result<LruPutCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        if self.cache_size == 0 {
            return Err(ConfigError::new("cache size must be greater than zero"));
        }
        let shards = self.concurrency.max(1);
        let base =
            LruCacheBase::with_shard_capacities(split_capacity(self.cache_size, shards), self.shard_seed);
        Ok(LruPutCache::new(
            base,
            self.update_existing,
            self.promote_on_duplicate,
        ))
    }
}

/// Splits `total` into `shards` capacities: `total / shards` each, with
/// the remainder handed to the first shards. The parts always sum to
/// `total`.
fn split_capacity(total: usize, shards: usize) -> Vec<usize> {
    let each = total / shards;
    let remainder = total % shards;
    (0..shards)
        .map(|idx| if idx < remainder { each + 1 } else { each })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cache_size_is_rejected() {
        let err = CacheBuilder::new(0).try_build::<u64, u64>().unwrap_err();
        assert!(err.message().contains("cache size"));
    }

    #[test]
    fn concurrency_zero_normalizes_to_one() {
        let cache = CacheBuilder::new(10)
            .concurrency(0)
            .try_build::<u64, u64>()
            .unwrap();
        assert_eq!(cache.shard_count(), 1);
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn split_is_even_when_divisible() {
        assert_eq!(split_capacity(12, 4), vec![3, 3, 3, 3]);
    }

    #[test]
    fn split_hands_remainder_to_first_shards() {
        assert_eq!(split_capacity(10, 3), vec![4, 3, 3]);
        assert_eq!(split_capacity(7, 4), vec![2, 2, 2, 1]);
    }

    #[test]
    fn split_allows_zero_capacity_shards() {
        assert_eq!(split_capacity(2, 5), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn split_always_sums_to_total() {
        for total in 1..40 {
            for shards in 1..10 {
                let parts = split_capacity(total, shards);
                assert_eq!(parts.len(), shards);
                assert_eq!(parts.iter().sum::<usize>(), total);
            }
        }
    }

    #[test]
    fn more_shards_than_entries_still_caches_something() {
        let cache = CacheBuilder::new(2)
            .concurrency(50)
            .try_build::<u64, u64>()
            .unwrap();
        assert_eq!(cache.shard_count(), 50);
        assert_eq!(cache.capacity(), 2);

        for key in 0..100u64 {
            cache.put(key, key);
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn builder_is_a_plain_value() {
        let a = CacheBuilder::new(8).concurrency(2).update_existing(true);
        let b = a.clone();
        assert_eq!(a, b);
    }
}
