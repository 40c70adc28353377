use std::sync::Arc;

use anyhow::Result;
use bear_tracks_http::{AppState, create_router};
use bear_tracks_storage::StorageBackend;

pub(crate) async fn run(storage: Arc<StorageBackend>, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(storage));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting HTTP server on {}", addr);

    // SSE clients never hang up on their own, so do not wait for them.
    tokio::select! {
        result = axum::serve(listener, router) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Received shutdown signal"),
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
