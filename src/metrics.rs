//! Cache-level operation counters.
//!
//! Counters are always on and recorded with relaxed atomics at the routing
//! layer, so shards stay free of bookkeeping. [`CacheMetrics`] is a plain
//! snapshot taken at a single point in time; under concurrency it is
//! internally consistent only in the sense that each counter is read once.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    rejected_updates: AtomicU64,
    evictions: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn snapshot(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            rejected_updates: self.rejected_updates.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_rejected_update(&self) {
        self.rejected_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time snapshot of cache operation counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Gets that found an entry.
    pub hits: u64,
    /// Gets that found nothing.
    pub misses: u64,
    /// Puts that created a new entry.
    pub inserts: u64,
    /// Puts that replaced an existing value (`update_existing` set).
    pub updates: u64,
    /// Puts that hit an existing key and kept its value.
    pub rejected_updates: u64,
    /// Entries displaced to stay within capacity.
    pub evictions: u64,
}

impl CacheMetrics {
    /// Fraction of gets that hit, in `[0.0, 1.0]`; `0.0` before any get.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let counters = CacheCounters::default();
        counters.inc_hit();
        counters.inc_hit();
        counters.inc_miss();
        counters.inc_insert();
        counters.inc_update();
        counters.inc_rejected_update();
        counters.inc_eviction();

        let metrics = counters.snapshot();
        assert_eq!(metrics.hits, 2);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.updates, 1);
        assert_eq!(metrics.rejected_updates, 1);
        assert_eq!(metrics.evictions, 1);
    }

    #[test]
    fn hit_ratio_handles_empty_and_mixed() {
        assert_eq!(CacheMetrics::default().hit_ratio(), 0.0);

        let metrics = CacheMetrics {
            hits: 3,
            misses: 1,
            ..CacheMetrics::default()
        };
        assert!((metrics.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
