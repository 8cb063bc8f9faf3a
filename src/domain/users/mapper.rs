//! Row to [`User`] mapping with explicit, typed per-column extraction.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use thiserror::Error;

use super::types::User;

/// Failure to turn a row into a [`User`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Column '{column}' is missing from the row")]
    MissingColumn { column: String },

    #[error("Column '{column}' cannot be read as {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
}

impl MappingError {
    fn from_sqlx(column: &str, expected: &'static str, error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::ColumnNotFound(_) => MappingError::MissingColumn {
                column: column.to_string(),
            },
            _ => MappingError::TypeMismatch {
                column: column.to_string(),
                expected,
            },
        }
    }
}

/// Named, typed column access over a single result row.
pub trait ColumnSource {
    fn integer(&self, column: &str) -> Result<i64, MappingError>;

    fn text(&self, column: &str) -> Result<String, MappingError>;

    fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, MappingError>;
}

impl ColumnSource for PgRow {
    fn integer(&self, column: &str) -> Result<i64, MappingError> {
        match self.try_get::<i64, _>(column) {
            Ok(value) => Ok(value),
            // SERIAL columns are INT4
            Err(sqlx::Error::ColumnDecode { .. }) => self
                .try_get::<i32, _>(column)
                .map(i64::from)
                .map_err(|e| MappingError::from_sqlx(column, "integer", e)),
            Err(e) => Err(MappingError::from_sqlx(column, "integer", e)),
        }
    }

    fn text(&self, column: &str) -> Result<String, MappingError> {
        self.try_get::<String, _>(column)
            .map_err(|e| MappingError::from_sqlx(column, "text", e))
    }

    fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, MappingError> {
        match self.try_get::<DateTime<Utc>, _>(column) {
            Ok(value) => Ok(value),
            // TIMESTAMP without time zone is taken to be UTC
            Err(sqlx::Error::ColumnDecode { .. }) => self
                .try_get::<NaiveDateTime, _>(column)
                .map(|naive| naive.and_utc())
                .map_err(|e| MappingError::from_sqlx(column, "timestamp", e)),
            Err(e) => Err(MappingError::from_sqlx(column, "timestamp", e)),
        }
    }
}

/// Map one row. Either every column converts or no `User` is produced.
pub fn map_user<R: ColumnSource + ?Sized>(row: &R) -> Result<User, MappingError> {
    Ok(User {
        id: row.integer("id")?,
        name: row.text("name")?,
        email: row.text("email")?,
        created_at: row.timestamp("created_at")?,
    })
}

/// Map a whole result set, stopping at the first row that does not fit.
pub fn map_users<R: ColumnSource>(rows: &[R]) -> Result<Vec<User>, MappingError> {
    rows.iter().map(map_user).collect()
}
