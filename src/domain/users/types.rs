//! User record as read from the `users` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of one `users` row.
///
/// Rows are owned by the database; this service never creates or changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key assigned by the database
    pub id: i64,

    pub name: String,

    pub email: String,

    /// Insertion time assigned by the database
    pub created_at: DateTime<Utc>,
}
