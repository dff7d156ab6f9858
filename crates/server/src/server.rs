//! HTTP server lifecycle.

use tokio::net::TcpListener;
use tutor_core::{AppError, AppResult};

use crate::context::ServiceContext;
use crate::routes::create_router;

/// Serve until Ctrl-C.
pub async fn run_server(ctx: ServiceContext, bind: &str) -> AppResult<()> {
    let app = create_router(ctx);

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", bind, e)))?;

    tracing::info!("Answer service listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(format!("HTTP server error: {}", e)))?;

    tracing::info!("Answer service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
