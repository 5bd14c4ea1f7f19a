//! Server startup and graceful shutdown.

use axum::Router;
use std::net::SocketAddr;
use tracing::info;

/// Bind `addr` and serve `router` until ctrl-c.
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    // Failing to install the handler means we simply never shut down
    // gracefully; serving must not abort over it.
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
