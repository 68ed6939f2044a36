//! Cache trait seams.
//!
//! Collaborators that memoize expensive results (the intended consumer of
//! this crate) should accept these traits rather than the concrete types,
//! so a different cache can be swapped in behind the same call sites.
//!
//! | Trait             | Extends      | Purpose                          |
//! |-------------------|--------------|----------------------------------|
//! | `ReadCache`       | -            | Lookup and introspection         |
//! | `WriteCache`      | `ReadCache`  | Put / remove / clear             |
//! | `ConcurrentCache` | `Send + Sync`| Marker for thread-safe caches    |
//!
//! ```
//! use std::sync::Arc;
//!
//! use shardlru::builder::CacheBuilder;
//! use shardlru::traits::WriteCache;
//!
//! fn memoized_detect<C: WriteCache<u64, String>>(cache: &C, evidence_hash: u64) -> Arc<String> {
//!     if let Some(hit) = cache.get(&evidence_hash) {
//!         return hit;
//!     }
//!     let result = Arc::new(format!("detected:{evidence_hash}"));
//!     cache.put_arc(evidence_hash, Arc::clone(&result));
//!     result
//! }
//!
//! let cache = CacheBuilder::new(32).try_build::<u64, String>().unwrap();
//! let first = memoized_detect(&cache, 7);
//! let second = memoized_detect(&cache, 7);
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::cache::{LruCacheBase, LruPutCache};
use crate::shard::PutOutcome;

/// Lookup and introspection surface shared by all cache layers.
pub trait ReadCache<K, V> {
    /// Looks up a key, counting as a use for eviction purposes.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Looks up a key without affecting eviction order.
    fn peek(&self, key: &K) -> Option<Arc<V>>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;
}

/// Caches that also accept writes.
pub trait WriteCache<K, V>: ReadCache<K, V> {
    fn put(&self, key: K, value: V) -> PutOutcome<K, V>;

    fn put_arc(&self, key: K, value: Arc<V>) -> PutOutcome<K, V>;

    fn remove(&self, key: &K) -> Option<Arc<V>>;

    fn clear(&self);
}

/// Marker for caches that are safe to share across threads by `&self`.
pub trait ConcurrentCache: Send + Sync {}

impl<K, V> ReadCache<K, V> for LruCacheBase<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        LruCacheBase::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<Arc<V>> {
        LruCacheBase::peek(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCacheBase::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCacheBase::len(self)
    }

    fn capacity(&self) -> usize {
        LruCacheBase::capacity(self)
    }
}

impl<K, V> ReadCache<K, V> for LruPutCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        LruPutCache::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<Arc<V>> {
        LruPutCache::peek(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruPutCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruPutCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruPutCache::capacity(self)
    }
}

impl<K, V> WriteCache<K, V> for LruPutCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&self, key: K, value: V) -> PutOutcome<K, V> {
        LruPutCache::put(self, key, value)
    }

    fn put_arc(&self, key: K, value: Arc<V>) -> PutOutcome<K, V> {
        LruPutCache::put_arc(self, key, value)
    }

    fn remove(&self, key: &K) -> Option<Arc<V>> {
        LruPutCache::remove(self, key)
    }

    fn clear(&self) {
        LruPutCache::clear(self)
    }
}

impl<K, V> ConcurrentCache for LruCacheBase<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
}

impl<K, V> ConcurrentCache for LruPutCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CacheBuilder;

    fn fill<C: WriteCache<u64, u64>>(cache: &C, count: u64) {
        for key in 0..count {
            cache.put(key, key * 2);
        }
    }

    #[test]
    fn generic_callers_work_through_the_traits() {
        let cache = CacheBuilder::new(8).try_build::<u64, u64>().unwrap();
        fill(&cache, 4);

        let read: &dyn ReadCache<u64, u64> = &cache;
        assert_eq!(read.len(), 4);
        assert_eq!(read.get(&2).as_deref(), Some(&4));
        assert!(read.peek(&3).is_some());
        assert!(!read.is_empty());
        assert_eq!(read.capacity(), 8);
    }

    #[test]
    fn marker_traits_hold_for_shareable_types() {
        fn assert_concurrent<C: ConcurrentCache>() {}
        assert_concurrent::<LruPutCache<u64, String>>();
        assert_concurrent::<LruCacheBase<String, Vec<u8>>>();
    }
}
