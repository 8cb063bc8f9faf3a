use anyhow::Result;

use hello_world_api::config::Settings;
use hello_world_api::postgres::PostgresPool;
use hello_world_api::server;
use hello_world_api::shutdown::shutdown_signal;
use hello_world_api::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    let _telemetry = init_telemetry(&settings.log, &settings.otel)?;
    tracing::info!("Configuration loaded");

    // Open the pool; failure here is fatal
    let pool = match PostgresPool::connect(&settings.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Could not connect to PostgreSQL");
            return Err(e.into());
        }
    };
    tracing::info!(database = %pool.database_url_masked(), "Connected to PostgreSQL");

    // Serve until a shutdown signal, then close the pool
    server::run(&settings.server_addr(), pool, shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
