use std::sync::Arc;

use crate::postgres::PostgresPool;
use crate::users::{PgUserStore, UserStore};

/// Per-request handler state. The pool is injected here at startup; handlers
/// never reach for a global.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(pool: PostgresPool) -> Self {
        Self::with_store(Arc::new(PgUserStore::new(pool)))
    }

    pub fn with_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
