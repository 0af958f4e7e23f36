//! Common test infrastructure for database integration tests.

use roster_config::DatabaseConfig;
use roster_repository::{DatabasePool, DatabasePoolInterface};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

/// Test database container wrapper.
///
/// Manages a PostgreSQL testcontainer lifecycle and provides a database pool.
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new test database with a fresh PostgreSQL container.
    ///
    /// Initializes the schema after container startup.
    pub async fn new() -> Self {
        let container = Postgres::default()
            .with_env_var("POSTGRES_USER", "roster")
            .with_env_var("POSTGRES_PASSWORD", "roster")
            .with_env_var("POSTGRES_DB", "roster_test")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get PostgreSQL port");

        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            name: "roster_test".to_string(),
            user: "roster".to_string(),
            password: "roster".to_string(),
            min_connections: 1,
            max_connections: 8,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            statement_timeout_secs: 10,
        };

        let pool = Self::connect_with_retry(&config, 30).await;

        pool.init_schema().await.expect("Failed to initialize schema");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> DatabasePool {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match DatabasePool::connect(config).await {
                Ok(pool) => return pool,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to database after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
