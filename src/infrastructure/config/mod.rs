mod settings;

pub use settings::{DatabaseConfig, LogConfig, LogFormat, OtelConfig, ServerConfig, Settings};
