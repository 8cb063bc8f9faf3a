//! API layer - HTTP endpoint handlers.

mod health;
mod root;
mod routes;
mod users;

// Re-export all handlers for use in server/app.rs
pub use health::{health, HealthResponse};
pub use root::{root, WelcomeResponse, WELCOME_MESSAGE};
pub use routes::api_routes;
pub use users::{list_test_users, list_users};
