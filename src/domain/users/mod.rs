//! Users: the record type, the row mapper, and the read-only store.

mod mapper;
mod store;
mod types;

pub use mapper::{map_user, map_users, ColumnSource, MappingError};
pub use store::{PgUserStore, UserStore, ALL_USERS_SQL, TEST_USERS_SQL};
pub use types::User;

#[cfg(test)]
pub(crate) use store::fixtures;
