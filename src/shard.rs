//! Independently locked bounded LRU shard.
//!
//! A shard owns a disjoint slice of the keyspace and runs the full LRU
//! algorithm under its own exclusive lock. The sharded cache is just a
//! vector of these behind a deterministic selector.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        order: RecencyList<Entry<K, V>>
//!   ┌─────────┬─────────┐             head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   │  key A  │  id_4   │                MRU                       LRU
//!   │  key B  │  id_0   │
//!   │  key C  │  id_2   │             evict = pop tail + drop index entry
//!   └─────────┴─────────┘
//! ```
//!
//! Invariant after every operation: `index.len() == order.len() <=
//! capacity`, and index and list describe the same entries.
//!
//! The lock is a `Mutex`, not an `RwLock`: a successful `get` splices the
//! entry to the MRU position, so every observation is also a mutation and
//! there is no read-only path to split.

use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;

/// Result of a [`LruShard::put`].
///
/// Keeps "previous value" and "evicted entry" distinguishable instead of
/// folding both into one optional.
#[derive(Debug, Clone)]
pub enum PutOutcome<K, V> {
    /// The key was absent and was inserted at the MRU position. Carries
    /// the entry evicted to make room, if the shard was full.
    Inserted(Option<(K, Arc<V>)>),
    /// The key was present and the stored value was replaced
    /// (`update_existing` set); carries the previous value.
    Replaced(Arc<V>),
    /// The key was present and the stored value was kept
    /// (`update_existing` unset); carries the stored value.
    Kept(Arc<V>),
}

impl<K, V> PutOutcome<K, V> {
    /// Returns the entry evicted by this put, if any.
    pub fn evicted(&self) -> Option<&(K, Arc<V>)> {
        match self {
            PutOutcome::Inserted(evicted) => evicted.as_ref(),
            _ => None,
        }
    }

    /// Returns the value that was stored under the key before this put,
    /// if the key was already present.
    pub fn previous(&self) -> Option<&Arc<V>> {
        match self {
            PutOutcome::Replaced(value) | PutOutcome::Kept(value) => Some(value),
            PutOutcome::Inserted(_) => None,
        }
    }

    /// Returns `true` if the put created a new entry.
    pub fn was_inserted(&self) -> bool {
        matches!(self, PutOutcome::Inserted(_))
    }
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

#[derive(Debug)]
struct ShardCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
}

impl<K, V> ShardCore<K, V>
where
    K: Eq + Hash,
{
    #[cfg(any(test, debug_assertions))]
    fn debug_validate(&self, capacity: usize) {
        assert_eq!(self.index.len(), self.order.len());
        assert!(self.order.len() <= capacity);
        self.order.debug_validate_invariants();
        for entry in self.order.iter() {
            assert!(self.index.contains_key(&entry.key));
        }
    }
}

/// Bounded LRU store for one slice of the keyspace.
///
/// All methods take `&self`; mutation happens under the shard's own
/// `parking_lot::Mutex`. Entries are owned exclusively by the shard and
/// escape only as `Arc<V>` clones.
pub struct LruShard<K, V> {
    capacity: usize,
    core: Mutex<ShardCore<K, V>>,
}

impl<K, V> LruShard<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shard holding at most `capacity` entries. A capacity of
    /// zero stores nothing (every insert is immediately displaced).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            core: Mutex::new(ShardCore {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                order: RecencyList::with_capacity(capacity),
            }),
        }
    }

    /// Looks up `key` and promotes it to the MRU position.
    ///
    /// A miss is a normal `None` result. Takes the exclusive lock even on
    /// the read path, because the promotion mutates the recency order.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.core.lock();
        let id = core.index.get(key).copied()?;
        core.order.move_to_front(id);
        let value = core.order.get(id).map(|entry| Arc::clone(&entry.value));

        #[cfg(debug_assertions)]
        core.debug_validate(self.capacity);

        value
    }

    /// Looks up `key` without touching the recency order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let core = self.core.lock();
        let id = core.index.get(key).copied()?;
        core.order.get(id).map(|entry| Arc::clone(&entry.value))
    }

    /// Inserts or updates `key` according to the policy flags.
    ///
    /// - Key present, `update_existing`: replace the value, promote to
    ///   MRU, report [`PutOutcome::Replaced`].
    /// - Key present, no `update_existing`: keep the value, report
    ///   [`PutOutcome::Kept`]; promote to MRU iff `promote_on_duplicate`.
    /// - Key absent: insert at MRU; if the shard now exceeds capacity,
    ///   evict the LRU tail and report it in [`PutOutcome::Inserted`].
    pub fn put(
        &self,
        key: K,
        value: Arc<V>,
        update_existing: bool,
        promote_on_duplicate: bool,
    ) -> PutOutcome<K, V> {
        let mut core = self.core.lock();

        if let Some(id) = core.index.get(&key).copied() {
            let entry = core
                .order
                .get_mut(id)
                .expect("indexed key missing from recency list");
            let outcome = if update_existing {
                PutOutcome::Replaced(mem::replace(&mut entry.value, value))
            } else {
                PutOutcome::Kept(Arc::clone(&entry.value))
            };
            if update_existing || promote_on_duplicate {
                core.order.move_to_front(id);
            }

            #[cfg(debug_assertions)]
            core.debug_validate(self.capacity);

            return outcome;
        }

        let id = core.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        core.index.insert(key, id);

        // Restore len <= capacity; with capacity 0 this displaces the
        // entry that was just inserted.
        let mut evicted = None;
        if core.order.len() > self.capacity {
            if let Some(entry) = core.order.pop_back() {
                core.index.remove(&entry.key);
                evicted = Some((entry.key, entry.value));
            }
        }

        #[cfg(debug_assertions)]
        core.debug_validate(self.capacity);

        PutOutcome::Inserted(evicted)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.core.lock();
        let id = core.index.remove(key)?;
        let removed = core.order.remove(id).map(|entry| entry.value);

        #[cfg(debug_assertions)]
        core.debug_validate(self.capacity);

        removed
    }

    pub fn contains(&self, key: &K) -> bool {
        self.core.lock().index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.core.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut core = self.core.lock();
        core.index.clear();
        core.order.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.lock().debug_validate(self.capacity);
    }
}

impl<K, V> std::fmt::Debug for LruShard<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruShard")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
