//! Service configuration (env-driven).

use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

use crate::{allocator::DEFAULT_MAX_ATTEMPTS, db::DbConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub database: DbConfig,
    pub allocator_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("ENI_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("ENI_LISTEN_ADDR must be a socket address (host:port).")?;

        let log_level = std::env::var("ENI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let database_url = std::env::var("DATABASE_CONN_STRING")
            .context("Missing database connection string. Set DATABASE_CONN_STRING.")?;

        let schema = std::env::var("DATABASE_SCHEMA")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "public".to_string());

        let defaults = DbConfig::default();

        let max_connections: u32 = env_number("DB_MAX_CONNECTIONS")?
            .unwrap_or(defaults.max_connections)
            .max(1);

        let min_connections: u32 = env_number("DB_MIN_CONNECTIONS")?
            .unwrap_or(defaults.min_connections)
            .min(max_connections);

        let acquire_timeout = env_number::<u64>("DB_ACQUIRE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.acquire_timeout);

        let allocator_max_attempts =
            env_number("ENI_ALLOC_MAX_ATTEMPTS")?.unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Ok(Self {
            listen_addr,
            log_level,
            database: DbConfig {
                database_url,
                schema,
                max_connections,
                min_connections,
                acquire_timeout,
                ..defaults
            },
            allocator_max_attempts,
        })
    }
}

fn env_number<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(name)
        .ok()
        .map(|v| v.parse::<T>())
        .transpose()
        .with_context(|| format!("{name} must be a non-negative integer."))
}
