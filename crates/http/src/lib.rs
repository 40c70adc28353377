//! HTTP API server for bear-tracks.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod api_types;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use bear_tracks_service::{AnalyticsService, LiveFeed, TrackingService};
use bear_tracks_storage::StorageBackend;
use tower_http::cors::{Any, CorsLayer};

pub use api_types::{TrackRequest, TrackResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Sessionizer for beacon events
    pub tracking_service: Arc<TrackingService>,
    /// Read-only dashboard queries
    pub analytics_service: Arc<AnalyticsService>,
    /// Fan-out of new pageviews to SSE clients
    pub live_feed: Arc<LiveFeed>,
    /// Backend name reported by `/api/version`
    pub storage_kind: &'static str,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        let live_feed = Arc::new(LiveFeed::new(Arc::clone(&storage)));
        Self {
            tracking_service: Arc::new(TrackingService::new(
                Arc::clone(&storage),
                Arc::clone(&live_feed),
            )),
            analytics_service: Arc::new(AnalyticsService::new(Arc::clone(&storage))),
            live_feed,
            storage_kind: storage.kind(),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // The beacon runs on other origins.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/track", post(handlers::track::track))
        .route("/api/live", get(handlers::live::live_events))
        .route("/api/stats", get(handlers::metrics::stats))
        .route("/api/sessions/{id}", get(handlers::sessions::get_session_detail))
        .route("/api/metrics/overview", get(handlers::metrics::overview))
        .route("/api/metrics/total-visits", get(handlers::metrics::total_visits))
        .route("/api/metrics/active-sessions", get(handlers::metrics::active_sessions))
        .route("/api/metrics/pages-per-session", get(handlers::metrics::pages_per_session))
        .route("/api/metrics/average-duration", get(handlers::metrics::average_duration))
        .route("/api/metrics/daily-visits", get(handlers::metrics::daily_visits))
        .route("/api/metrics/bounce-rate", get(handlers::metrics::bounce_rate))
        .route("/api/metrics/session-durations", get(handlers::metrics::session_durations))
        .route("/api/metrics/session-summary", get(handlers::metrics::session_summary))
        .route("/api/metrics/page-flow", get(handlers::metrics::page_flow))
        .route("/api/metrics/heatmap", get(handlers::metrics::heatmap))
        .route("/api/metrics/peaks", get(handlers::metrics::peaks))
        .route("/api/metrics/timing", get(handlers::metrics::timing))
        .route("/api/metrics/weekday-totals", get(handlers::metrics::weekday_totals))
        .route("/api/metrics/geography", get(handlers::metrics::geography))
        .route("/api/metrics/active-pages", get(handlers::metrics::active_pages))
        .route("/api/metrics/realtime", get(handlers::metrics::realtime))
        .route("/api/metrics/recent", get(handlers::metrics::recent_visits))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION"), storage: state.storage_kind })
}
