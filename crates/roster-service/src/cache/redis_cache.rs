//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use roster_config::RedisConfig;
use roster_core::{with_timeout, RosterError, RosterResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default bound on a single cache call.
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Expiry in whole milliseconds for PSETEX, which rejects zero.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
    /// Upper bound on connection checkout plus one command.
    operation_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Create a cache service with a custom per-call timeout.
    #[must_use]
    pub fn with_timeout(pool: Arc<Pool>, operation_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Build the pool from configuration.
    ///
    /// Connections are opened lazily. An unreachable server is logged and
    /// left to the degrade-to-miss policy rather than failing startup.
    pub async fn connect(config: &RedisConfig) -> RosterResult<Self> {
        info!("Creating Redis connection pool at {}", config.url());

        let pool = Config::from_url(config.url())
            .builder()
            .map_err(|e| RosterError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RosterError::cache(format!("Failed to create Redis pool: {}", e)))?;

        let service = Self::with_timeout(Arc::new(pool), config.operation_timeout());
        match service.ping().await {
            Ok(()) => info!("Redis connection pool created successfully"),
            Err(e) => warn!("Redis is not reachable, continuing without a warm cache: {}", e),
        }

        Ok(service)
    }

    /// Round-trip a PING to the server.
    pub async fn ping(&self) -> RosterResult<()> {
        self.bounded("ping", async {
            let mut conn = self.get_conn().await?;
            deadpool_redis::redis::cmd("PING")
                .query_async::<String>(&mut *conn)
                .await
                .map_err(|e| RosterError::cache(format!("PING failed: {}", e)))?;
            Ok(())
        })
        .await
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| RosterError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(RosterError::cache("Cache is disabled")),
        }
    }

    /// Bound a cache call, reporting expiry as a cache error.
    async fn bounded<T, Fut>(&self, operation: &str, fut: Fut) -> RosterResult<T>
    where
        Fut: std::future::Future<Output = RosterResult<T>>,
    {
        with_timeout(self.operation_timeout, operation, fut)
            .await
            .map_err(|e| match e {
                RosterError::Timeout(message) => RosterError::Cache(message),
                other => other,
            })
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let value: Option<String> = self
            .bounded("cache get", async {
                let mut conn = self.get_conn().await?;
                conn.get(key)
                    .await
                    .map_err(|e| RosterError::cache(format!("Failed to get key '{}': {}", key, e)))
            })
            .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl_ms = ttl_millis(ttl);

        self.bounded("cache set", async {
            let mut conn = self.get_conn().await?;
            conn.pset_ex::<_, _, ()>(key, value, ttl_ms)
                .await
                .map_err(|e| RosterError::cache(format!("Failed to set key '{}': {}", key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}ms", key, ttl_ms);
        Ok(())
    }
}
