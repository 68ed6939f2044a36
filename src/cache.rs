//! Sharded cache layers: key routing and the put policy.
//!
//! [`LruCacheBase`] partitions the keyspace over a vector of
//! [`LruShard`]s via a deterministic [`ShardSelector`] and exposes the
//! uniform read surface. [`LruPutCache`] composes the base with the
//! configured write policy (`update_existing`, `promote_on_duplicate`).
//!
//! ```text
//!   CacheBuilder ──► LruPutCache ──► LruCacheBase ──► [LruShard; N]
//!                        put              get            per-shard lock
//! ```
//!
//! No cache-wide lock exists. Both layers hold no mutable state of their
//! own, so one instance can be shared by `&self` across arbitrarily many
//! threads; operations on different shards proceed fully in parallel and
//! eviction is computed per shard (approximate global LRU by design).
//!
//! Construct instances through
//! [`CacheBuilder`](crate::builder::CacheBuilder):
//!
//! ```
//! use shardlru::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new(100)
//!     .concurrency(4)
//!     .try_build::<u64, String>()
//!     .unwrap();
//!
//! cache.put(1, "result".to_string());
//! assert_eq!(cache.get(&1).as_deref(), Some(&"result".to_string()));
//! assert_eq!(cache.get(&2), None);
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::ds::selector::ShardSelector;
use crate::metrics::{CacheCounters, CacheMetrics};
use crate::shard::{LruShard, PutOutcome};

/// Read side of the sharded cache: routes every key to exactly one shard.
pub struct LruCacheBase<K, V> {
    shards: Vec<LruShard<K, V>>,
    selector: ShardSelector,
    capacity: usize,
    counters: CacheCounters,
}

impl<K, V> LruCacheBase<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Builds the shard vector from per-shard capacities computed by the
    /// builder. The selector is sized to the shard count, so routing and
    /// storage can never disagree.
    pub(crate) fn with_shard_capacities(capacities: Vec<usize>, seed: u64) -> Self {
        let capacity = capacities.iter().sum();
        let shards: Vec<_> = capacities.into_iter().map(LruShard::new).collect();
        let selector = ShardSelector::new(shards.len(), seed);
        Self {
            shards,
            selector,
            capacity,
            counters: CacheCounters::default(),
        }
    }

    pub(crate) fn shard_for(&self, key: &K) -> &LruShard<K, V> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    pub(crate) fn counters(&self) -> &CacheCounters {
        &self.counters
    }

    /// Looks up `key`, promoting it to MRU within its shard.
    ///
    /// A miss is a normal `None`, not an error.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        match self.shard_for(key).get(key) {
            Some(value) => {
                self.counters.inc_hit();
                Some(value)
            },
            None => {
                self.counters.inc_miss();
                None
            },
        }
    }

    /// Looks up `key` without affecting recency order or hit/miss counts.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.shard_for(key).peek(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard_for(key).contains(key)
    }

    /// Total entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(LruShard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(LruShard::is_empty)
    }

    /// Configured total capacity (sum of shard capacities).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
    }

    /// Snapshot of the operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.counters.snapshot()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        for shard in &self.shards {
            shard.debug_validate_invariants();
        }
    }
}

impl<K, V> std::fmt::Debug for LruCacheBase<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCacheBase")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("shards", &self.shards.len())
            .finish_non_exhaustive()
    }
}

/// Sharded LRU cache with put support.
///
/// Composes [`LruCacheBase`] with the write policy chosen at build time.
/// Values are stored as `Arc<V>`: [`put`](Self::put) wraps for you,
/// [`put_arc`](Self::put_arc) accepts a pre-wrapped value so a result can
/// be shared with the cache without a second allocation.
///
/// # Example
///
/// ```
/// use shardlru::builder::CacheBuilder;
/// use shardlru::shard::PutOutcome;
///
/// let cache = CacheBuilder::new(2).try_build::<u64, &str>().unwrap();
///
/// cache.put(1, "a");
/// cache.put(2, "b");
/// let outcome = cache.put(3, "c");
///
/// // Capacity 2: inserting a third entry displaced the oldest one.
/// assert!(matches!(outcome, PutOutcome::Inserted(Some(_))));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruPutCache<K, V> {
    base: LruCacheBase<K, V>,
    update_existing: bool,
    promote_on_duplicate: bool,
}

impl<K, V> LruPutCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(
        base: LruCacheBase<K, V>,
        update_existing: bool,
        promote_on_duplicate: bool,
    ) -> Self {
        Self {
            base,
            update_existing,
            promote_on_duplicate,
        }
    }

    /// Read-side view of this cache.
    pub fn base(&self) -> &LruCacheBase<K, V> {
        &self.base
    }

    /// Stores `value` under `key` according to the configured policy and
    /// returns what happened.
    ///
    /// Never fails and never reports "full": eviction transparently makes
    /// room within the key's shard.
    pub fn put(&self, key: K, value: V) -> PutOutcome<K, V> {
        self.put_arc(key, Arc::new(value))
    }

    /// Like [`put`](Self::put) for values already wrapped in `Arc`.
    pub fn put_arc(&self, key: K, value: Arc<V>) -> PutOutcome<K, V> {
        let shard = self.base.shard_for(&key);
        let outcome = shard.put(key, value, self.update_existing, self.promote_on_duplicate);
        match &outcome {
            PutOutcome::Inserted(evicted) => {
                self.base.counters().inc_insert();
                if evicted.is_some() {
                    self.base.counters().inc_eviction();
                }
            },
            PutOutcome::Replaced(_) => self.base.counters().inc_update(),
            PutOutcome::Kept(_) => self.base.counters().inc_rejected_update(),
        }
        outcome
    }

    /// Removes `key` from its shard and returns the stored value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.base.shard_for(key).remove(key)
    }

    pub fn clear(&self) {
        self.base.clear();
    }

    // Read surface, delegated to the base.

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.base.get(key)
    }

    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.base.peek(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.base.contains(key)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    pub fn shard_count(&self) -> usize {
        self.base.shard_count()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.base.metrics()
    }
}

impl<K, V> std::fmt::Debug for LruPutCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruPutCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("update_existing", &self.update_existing)
            .field("promote_on_duplicate", &self.promote_on_duplicate)
            .finish_non_exhaustive()
    }
}
