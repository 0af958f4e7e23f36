//! Read-through wrapper that turns cache faults into misses.

use super::{CacheExt, CacheInterface};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Outcome of a cache write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    /// The value was written.
    Stored,
    /// Caching is disabled; nothing was written.
    Skipped,
    /// The store rejected or timed out the write. Already logged.
    Failed,
}

/// Cache front for a slower source of truth.
///
/// Neither operation ever returns an error: a failed lookup is a miss and a
/// failed write is reported as [`CacheWrite::Failed`].
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl ReadThroughCache {
    /// Wrap a cache backend with the given entry lifetime.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Entry lifetime used for writes.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key`, treating any cache error or malformed entry as a miss.
    pub async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        if !self.cache.is_enabled() {
            return None;
        }

        match self.cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store `value` under `key`.
    pub async fn store<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> CacheWrite {
        if !self.cache.is_enabled() {
            return CacheWrite::Skipped;
        }

        match self.cache.set(key, value, self.ttl).await {
            Ok(()) => CacheWrite::Stored,
            Err(e) => {
                warn!(key, error = %e, "Cache write failed, entry not cached");
                CacheWrite::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCache, RedisCacheService};
    use async_trait::async_trait;
    use roster_core::{RosterError, RosterResult};

    struct FailingCache;

    #[async_trait]
    impl CacheInterface for FailingCache {
        async fn get_raw(&self, _key: &str) -> RosterResult<Option<String>> {
            Err(RosterError::cache("connection refused"))
        }

        async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> RosterResult<()> {
            Err(RosterError::cache("connection refused"))
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_store_then_lookup() {
        let cache = ReadThroughCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60));

        assert_eq!(cache.store("n", &42_i64).await, CacheWrite::Stored);
        assert_eq!(cache.lookup::<i64>("n").await, Some(42));
    }

    #[tokio::test]
    async fn test_failures_degrade_to_miss() {
        let cache = ReadThroughCache::new(Arc::new(FailingCache), Duration::from_secs(60));

        assert_eq!(cache.lookup::<i64>("n").await, None);
        assert_eq!(cache.store("n", &42_i64).await, CacheWrite::Failed);
    }

    #[tokio::test]
    async fn test_malformed_entry_is_miss() {
        let backend = Arc::new(InMemoryCache::new());
        backend.set_raw("n", "not json", Duration::from_secs(60)).await.unwrap();
        let cache = ReadThroughCache::new(backend, Duration::from_secs(60));

        assert_eq!(cache.lookup::<i64>("n").await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_skips() {
        let cache = ReadThroughCache::new(Arc::new(RedisCacheService::disabled()), Duration::from_secs(60));

        assert_eq!(cache.store("n", &1_i64).await, CacheWrite::Skipped);
        assert_eq!(cache.lookup::<i64>("n").await, None);
    }
}
