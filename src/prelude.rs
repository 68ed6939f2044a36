pub use crate::builder::CacheBuilder;
pub use crate::cache::{LruCacheBase, LruPutCache};
pub use crate::error::ConfigError;
pub use crate::metrics::CacheMetrics;
pub use crate::shard::{LruShard, PutOutcome};
pub use crate::traits::{ConcurrentCache, ReadCache, WriteCache};
