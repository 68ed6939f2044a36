//! Micro-operation benchmarks for the sharded LRU cache.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for get and put across shard counts
//! under identical conditions, plus a contended multi-threaded workload.

use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use shardlru::builder::CacheBuilder;
use shardlru::cache::LruPutCache;

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

fn prefilled(concurrency: usize) -> LruPutCache<u64, u64> {
    let cache = CacheBuilder::new(CAPACITY)
        .concurrency(concurrency)
        .try_build::<u64, u64>()
        .unwrap();
    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }
    cache
}

// ============================================================================
// Get Hit Latency (ns/op)
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    for concurrency in [1usize, 4, 16] {
        group.bench_function(format!("shards_{concurrency}"), |b| {
            b.iter_custom(|iters| {
                let cache = prefilled(concurrency);
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = i % (CAPACITY as u64);
                        black_box(cache.get(&key));
                    }
                }
                start.elapsed()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Put Latency, including evicting puts (ns/op)
// ============================================================================

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_ns");
    group.throughput(Throughput::Elements(OPS));

    for concurrency in [1usize, 4, 16] {
        group.bench_function(format!("shards_{concurrency}"), |b| {
            b.iter_custom(|iters| {
                let cache = prefilled(concurrency);
                let start = Instant::now();
                for round in 0..iters {
                    for i in 0..OPS {
                        // Fresh keys each round keep the cache at capacity
                        // and every put on the insert/evict path.
                        let key = (round + 1) * OPS + i;
                        black_box(cache.put(key, key));
                    }
                }
                start.elapsed()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Contended mixed workload across threads (ops/batch)
// ============================================================================

fn bench_contended_mixed(c: &mut Criterion) {
    const THREADS: u64 = 8;
    const OPS_PER_THREAD: u64 = 25_000;

    let mut group = c.benchmark_group("contended_mixed");
    group.throughput(Throughput::Elements(THREADS * OPS_PER_THREAD));
    group.sample_size(10);

    for concurrency in [1usize, 16] {
        group.bench_function(format!("shards_{concurrency}"), |b| {
            b.iter_custom(|iters| {
                let cache = Arc::new(prefilled(concurrency));
                let start = Instant::now();
                for _ in 0..iters {
                    let handles: Vec<_> = (0..THREADS)
                        .map(|thread_id| {
                            let cache = Arc::clone(&cache);
                            thread::spawn(move || {
                                for i in 0..OPS_PER_THREAD {
                                    let key = (thread_id * OPS_PER_THREAD + i)
                                        % (2 * CAPACITY as u64);
                                    if i % 2 == 0 {
                                        black_box(cache.get(&key));
                                    } else {
                                        black_box(cache.put(key, key));
                                    }
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                }
                start.elapsed()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_put, bench_contended_mixed);
criterion_main!(benches);
