use std::future::Future;

use tokio::net::TcpListener;

use crate::postgres::PostgresPool;
use crate::shutdown::GracefulShutdown;

use super::{create_app, AppState};

/// Serve on `addr` until `signal` resolves, then close the pool.
///
/// The pool is closed once on every exit path, including a failed bind.
pub async fn run<S>(addr: &str, pool: PostgresPool, signal: S) -> std::io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let served = serve(addr, AppState::new(pool.clone()), signal).await;

    let reason = match &served {
        Ok(()) => "server stopped",
        Err(_) => "server failed",
    };
    let result = GracefulShutdown::new(pool).execute(reason).await;
    if result.pool_closed {
        tracing::info!("Disconnected from PostgreSQL");
    } else {
        tracing::warn!("PostgreSQL connection pool did not close cleanly");
    }

    served
}

async fn serve<S>(addr: &str, state: AppState, signal: S) -> std::io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(signal)
        .await
}
