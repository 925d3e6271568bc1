/// PostgreSQL connection pool
///
/// One pool serves the whole service. It is built from a [`DatabaseConfig`],
/// verified with a round-trip query before being handed out, and closed
/// explicitly on shutdown.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Pool sizing and timeout settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Upper bound on open connections
    pub max_connections: u32,

    /// Idle connections kept warm
    pub min_connections: u32,

    /// How long `acquire` may wait for a free connection
    pub acquire_timeout: Duration,

    /// Idle time after which a connection is dropped (None keeps it open)
    pub idle_timeout: Option<Duration>,

    /// Forced recycling age for connections (None disables recycling)
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    /// Settings for a given URL with the standard pool shape
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        let mut options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .test_before_acquire(true);

        if let Some(idle) = self.idle_timeout {
            options = options.idle_timeout(idle);
        }
        if let Some(lifetime) = self.max_lifetime {
            options = options.max_lifetime(lifetime);
        }

        options
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Opens the connection pool and verifies it with a round-trip query
///
/// A bad URL or unreachable server surfaces here, at startup, instead of on
/// the first request.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening database pool"
    );

    let pool = config.pool_options().connect(&config.url).await?;
    health_check(&pool).await?;

    info!("Database pool ready");
    Ok(pool)
}

/// Round-trip query confirming the database answers
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    debug!("Database health check answered");

    if one != 1 {
        return Err(sqlx::Error::Protocol(
            "health check query returned an unexpected row".into(),
        ));
    }

    Ok(())
}

/// Drains and closes the pool during shutdown
pub async fn close_pool(pool: PgPool) {
    info!("Closing database pool");
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::new("postgresql://localhost/taskboard");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert!(config.idle_timeout.is_some());
        assert!(config.max_lifetime.is_some());
    }

    #[test]
    fn test_default_is_empty_url() {
        assert!(DatabaseConfig::default().url.is_empty());
    }
}
