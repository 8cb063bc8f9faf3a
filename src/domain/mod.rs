//! Domain layer modules
//!
//! - `users`: user records, row mapping and the read-only store

pub mod users;
