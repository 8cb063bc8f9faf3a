//! PostgreSQL persistence module.
//!
//! Provides the process-wide connection pool and scoped connection access.

pub mod pool;

pub use pool::{PoolError, PoolStats, PostgresPool};
