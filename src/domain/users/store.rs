//! Read access to the `users` table.

use async_trait::async_trait;
use sqlx::postgres::PgConnection;

use crate::error::Result;
use crate::postgres::{PoolError, PostgresPool};

use super::mapper::map_users;
use super::types::User;

/// Every user, oldest id first.
pub const ALL_USERS_SQL: &str = "SELECT id, name, email, created_at FROM users ORDER BY id";

/// Users with `id <= 3`, oldest id first.
pub const TEST_USERS_SQL: &str =
    "SELECT id, name, email, created_at FROM users WHERE id <= 3 ORDER BY id";

/// Source of user snapshots for the HTTP handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by ascending id.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Users with `id <= 3` ordered by ascending id.
    async fn list_test_users(&self) -> Result<Vec<User>>;
}

/// [`UserStore`] backed by the shared PostgreSQL pool.
///
/// Each call checks out one connection for one query and returns it before
/// the mapped rows are handed back.
pub struct PgUserStore {
    pool: PostgresPool,
}

impl PgUserStore {
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }
}

async fn fetch_users(conn: &mut PgConnection, sql: &'static str) -> Result<Vec<User>> {
    let rows = sqlx::query(sql)
        .fetch_all(conn)
        .await
        .map_err(PoolError::Query)?;

    let users = map_users(&rows)?;
    tracing::debug!(count = users.len(), "Fetched users");
    Ok(users)
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(name = "list_users", skip(self))]
    async fn list_users(&self) -> Result<Vec<User>> {
        self.pool
            .with_connection(|conn| Box::pin(fetch_users(conn, ALL_USERS_SQL)))
            .await
    }

    #[tracing::instrument(name = "list_test_users", skip(self))]
    async fn list_test_users(&self) -> Result<Vec<User>> {
        self.pool
            .with_read_only(|conn| Box::pin(fetch_users(conn, TEST_USERS_SQL)))
            .await
    }
}
