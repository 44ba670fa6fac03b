//! MySQL connection pool management.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use rw_shared::config::database::DatabaseConfig;

/// Wrapper around the SQLx MySQL pool
///
/// Repositories clone the inner pool; it is cheap, the pool itself is
/// reference-counted.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    max_connections: u32,
}

/// Point-in-time pool usage numbers
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    /// Connections currently open
    pub connections: u32,
    /// Open connections sitting idle
    pub idle_connections: u32,
    /// Configured pool ceiling
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

impl DatabasePool {
    /// Connect to MySQL with the given configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await?;

        info!(max_connections = config.max_connections, "database pool created");

        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    /// Access the inner SQLx pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Run a trivial query to verify the database is reachable
    pub async fn health_check(&self) -> Result<bool, sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }

    /// Current pool usage
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.max_connections,
        }
    }

    /// Close all connections gracefully
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
