//! Application builder and lifecycle.

use axum::Router;
use roster_config::{AppConfig, CacheBackend, RedisConfig};
use roster_core::{RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePool, DatabasePoolInterface, PgUserRepository};
use roster_rest::{create_router, AppState};
use roster_service::{CacheInterface, InMemoryCache, ReadThroughCache, RedisCacheService, UserServiceImpl};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the store, prepares the schema and wires every component.
    pub async fn build(self) -> RosterResult<App> {
        let config = self.config.unwrap_or_default();

        let database = create_pool(&config.database).await?;

        info!("Initializing database...");
        database.init_schema().await?;
        info!("Database initialized");

        let cache = ReadThroughCache::new(build_cache(&config.redis).await?, config.redis.ttl());
        let repository = Arc::new(PgUserRepository::new(Arc::clone(&database)));
        let user_service = Arc::new(UserServiceImpl::new(repository, cache));

        let state = AppState::new(user_service, database.clone());
        let router = create_router(state, &config.server);

        Ok(App {
            config,
            router,
            database,
        })
    }

    /// Builds the application and serves until a shutdown signal arrives.
    pub async fn run(self) -> RosterResult<()> {
        self.build().await?.run().await
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects the cache backend from configuration.
pub async fn build_cache(config: &RedisConfig) -> RosterResult<Arc<dyn CacheInterface>> {
    if !config.enabled {
        info!("Cache disabled, every read goes to the database");
        return Ok(Arc::new(RedisCacheService::disabled()));
    }

    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache");
            Ok(Arc::new(InMemoryCache::new()))
        }
        CacheBackend::Redis => Ok(Arc::new(RedisCacheService::connect(config).await?)),
    }
}

/// A fully wired application, ready to serve.
pub struct App {
    config: AppConfig,
    router: Router,
    database: Arc<DatabasePool>,
}

impl App {
    /// The HTTP router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The shared database pool.
    #[must_use]
    pub fn database(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.database)
    }

    /// Binds the configured address and serves until SIGINT or SIGTERM.
    pub async fn run(self) -> RosterResult<()> {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Starting REST server on http://{}", addr);
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on `listener` until `signal` resolves, then drains in-flight
    /// requests and closes the database pool.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)));

        info!("Shutting down...");
        self.database.close().await;
        info!("Server shutdown complete");

        result
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_builder_default() {
        let builder = AppBuilder::default();
        assert!(builder.config.is_none());
    }

    #[test]
    fn test_app_builder_with_config() {
        let builder = AppBuilder::new().with_config(AppConfig::default());
        assert!(builder.config.is_some());
    }

    #[tokio::test]
    async fn test_disabled_cache_is_selected() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = build_cache(&config).await.unwrap();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_memory_cache_is_selected() {
        let config = RedisConfig {
            backend: CacheBackend::Memory,
            ..RedisConfig::default()
        };
        let cache = build_cache(&config).await.unwrap();
        assert!(cache.is_enabled());
    }

    #[tokio::test]
    async fn test_unreachable_redis_does_not_fail_startup() {
        let config = RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            operation_timeout_ms: 200,
            ..RedisConfig::default()
        };
        let cache = build_cache(&config).await.unwrap();
        assert!(cache.is_enabled());
    }
}
