use axum::{routing::get, Router};

use crate::server::AppState;

use super::health::health;
use super::root::root;
use super::users::{list_test_users, list_users};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Health
        .route("/health", get(health))
        // Users (read-only)
        .route("/users", get(list_users))
        .route("/users-test", get(list_test_users))
}
