//! Database layer for the identifier service.
//!
//! This module provides:
//! - Connection pool management
//! - The `CounterStore` contract the allocator runs against
//! - A Postgres counter store and an in-memory one for tests
//!
//! The database layer uses SQLx with Postgres. All mutual exclusion between
//! concurrent allocations is delegated to the database: single-statement
//! atomic updates and the counter table's primary key.

mod counters;
mod error;
mod memory;

pub use counters::{PgCounterStore, TABLE_NAME};
pub use error::DbError;
pub use memory::{MemoryCounterStore, MemoryFault};

use async_trait::async_trait;
use eni_id::CounterKey;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Result of trying to create a counter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// This call inserted the row at index 0.
    Created,
    /// Another request created the row first.
    AlreadyExists,
}

/// Durable per-key counter storage.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Make sure the counter table exists. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), DbError>;

    /// Atomically increment the counter for `key` and return the new value.
    ///
    /// Returns `None` when no row exists for `key`.
    async fn try_increment(&self, key: &CounterKey) -> Result<Option<i64>, DbError>;

    /// Insert the counter row for `key` at index 0.
    ///
    /// A row that already exists is reported as `AlreadyExists`, not an error.
    async fn try_create(&self, key: &CounterKey) -> Result<CreateOutcome, DbError>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> Result<(), DbError>;
}

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL.
    pub database_url: String,

    /// Schema holding the counter table.
    pub schema: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of idle connections.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub acquire_timeout: Duration,

    /// Idle connection timeout.
    pub idle_timeout: Duration,

    /// Maximum lifetime of a connection.
    pub max_lifetime: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/eniidentificador".to_string(),
            schema: "public".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .connect(&config.database_url)
            .await
            .map_err(DbError::Connect)?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a counter store handle for the given schema.
    pub fn counter_store(&self, schema: &str) -> Result<PgCounterStore, DbError> {
        PgCounterStore::new(self.pool.clone(), schema)
    }

    /// Close every pooled connection. Waits for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
