//! Database access for the product catalog.
//!
//! Owns the connection pool, the embedded migrations (schema + seed data) and
//! the read-only repositories used by the API.

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Migrations embedded from `db/migrations` at the workspace root.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Connection pool sizing and acquisition limits.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Upper bound on concurrently open connections.
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// How often to retry the initial connection while the database starts up.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of connection attempts (at least one is always made).
    pub attempts: u32,
    /// Pause between failed attempts.
    pub delay: Duration,
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
}

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    pool_options(settings).connect(database_url).await
}

/// Create a pool without opening a connection; connections are established
/// on first use.
pub fn create_lazy_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    pool_options(settings).connect_lazy(database_url)
}

/// Create a connection pool, retrying while the database is not reachable yet.
///
/// Returns the last connection error once every attempt has failed.
pub async fn connect_with_retry(
    database_url: &str,
    settings: &PoolSettings,
    retry: RetryPolicy,
) -> Result<DbPool, sqlx::Error> {
    let attempts = retry.attempts.max(1);
    let mut attempt = 1;
    loop {
        match create_pool(database_url, settings).await {
            Ok(pool) => return Ok(pool),
            Err(err) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    attempts,
                    error = %err,
                    "Database not ready, retrying",
                );
                tokio::time::sleep(retry.delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Round-trip a trivial statement to verify connectivity.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
