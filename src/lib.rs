// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::postgres;

// Domain layer
pub mod domain;

pub use domain::users;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod shutdown;
pub mod telemetry;
