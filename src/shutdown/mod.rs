//! Graceful shutdown handling.
//!
//! The HTTP server stops accepting connections and drains in-flight requests
//! first; afterwards [`GracefulShutdown::execute`] tears down the connection
//! pool exactly once.

use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;

use crate::postgres::PostgresPool;

/// Configuration for graceful shutdown behavior
#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// Time allowed for the pool to close its connections (default: 10 seconds)
    pub pool_close_timeout: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            pool_close_timeout: Duration::from_secs(10),
        }
    }
}

/// Releases process-wide resources once the server has stopped.
pub struct GracefulShutdown {
    pool: PostgresPool,
    config: ShutdownConfig,
}

impl GracefulShutdown {
    pub fn new(pool: PostgresPool) -> Self {
        Self::with_config(pool, ShutdownConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(pool: PostgresPool, config: ShutdownConfig) -> Self {
        Self { pool, config }
    }

    /// Execute the shutdown sequence. Calling it again is harmless.
    #[tracing::instrument(name = "graceful_shutdown", skip(self))]
    pub async fn execute(&self, reason: &str) -> ShutdownResult {
        let start = std::time::Instant::now();
        let mut result = ShutdownResult::default();

        let stats = self.pool.stats();
        tracing::info!(
            reason = %reason,
            open_connections = stats.size,
            in_use = stats.in_use,
            "Closing PostgreSQL connection pool"
        );

        match timeout(self.config.pool_close_timeout, self.pool.close()).await {
            Ok(closed_now) => {
                result.pool_closed = true;
                result.already_closed = !closed_now;
                result.success = true;
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.pool_close_timeout.as_millis() as u64,
                    "Timed out closing the connection pool"
                );
            }
        }

        result.duration = start.elapsed();

        tracing::info!(
            pool_closed = result.pool_closed,
            already_closed = result.already_closed,
            duration_ms = result.duration.as_millis(),
            "Graceful shutdown completed"
        );

        result
    }
}

/// Result of a graceful shutdown operation
#[derive(Debug, Default)]
pub struct ShutdownResult {
    /// Whether shutdown completed successfully
    pub success: bool,
    /// Whether the pool is closed
    pub pool_closed: bool,
    /// The pool had been closed by an earlier call
    pub already_closed: bool,
    /// Total time taken for shutdown
    pub duration: Duration,
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    fn lazy_pool() -> PostgresPool {
        let config = DatabaseConfig {
            min_connections: 0,
            ..DatabaseConfig::default()
        };
        PostgresPool::connect_lazy(&config).unwrap()
    }

    #[tokio::test]
    async fn test_shutdown_closes_pool() {
        let pool = lazy_pool();
        let shutdown = GracefulShutdown::new(pool.clone());

        let result = shutdown.execute("test shutdown").await;

        assert!(result.success);
        assert!(result.pool_closed);
        assert!(!result.already_closed);
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_shutdown_twice_is_harmless() {
        let shutdown = GracefulShutdown::new(lazy_pool());

        shutdown.execute("first").await;
        let second = shutdown.execute("second").await;

        assert!(second.success);
        assert!(second.already_closed);
    }

    #[test]
    fn test_shutdown_config_defaults() {
        let config = ShutdownConfig::default();
        assert_eq!(config.pool_close_timeout, Duration::from_secs(10));
    }
}
