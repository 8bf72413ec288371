//! PostgreSQL database service
//!
//! Owns the connection pool, the embedded migration runner, and the
//! repository functions the Projection Writer and Topic Supervisor use to
//! read and write persisted state.

pub mod error;
mod migrations;
pub mod repositories;
pub mod schema;

pub use error::PostgresError;
pub use sqlx::PgPool;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::constants::{
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_HEALTH_CHECK_INTERVAL_SECS,
};

/// PostgreSQL database service
///
/// Created once at process startup and shared (via `PgPool`'s own internal
/// `Arc`) across every Topic Supervisor.
pub struct PostgresService {
    pool: PgPool,
}

impl PostgresService {
    /// Initialize the connection pool and run pending migrations.
    pub async fn init(database_url: &str) -> Result<Self, PostgresError> {
        if database_url.trim().is_empty() {
            return Err(PostgresError::Config("database URL is required".into()));
        }

        let options: PgConnectOptions = database_url
            .parse()
            .map_err(|e| PostgresError::Config(format!("invalid database URL: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(POSTGRES_DEFAULT_MAX_CONNECTIONS)
            .min_connections(POSTGRES_DEFAULT_MIN_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS))
            .max_lifetime(Duration::from_secs(POSTGRES_DEFAULT_MAX_LIFETIME_SECS))
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!("postgres pool initialized");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("postgres pool closed");
    }

    /// Start a background health check task.
    pub fn start_health_check_task(
        self: &Arc<Self>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(POSTGRES_HEALTH_CHECK_INTERVAL_SECS));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("postgres health check task shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = sqlx::query("SELECT 1").execute(&db.pool).await {
                            tracing::warn!("postgres health check failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    // Tests that need a live database are colocated with the repositories
    // they exercise and are skipped when no PostgreSQL instance is reachable.
}
