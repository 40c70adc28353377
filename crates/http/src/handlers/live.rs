use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use bear_tracks_core::PageView;
use futures_util::stream::Stream;

use crate::AppState;
use crate::api_error::ApiError;

/// SSE event name for every pushed pageview.
const PAGEVIEW_EVENT: &str = "pageview";

/// `GET /api/live`
///
/// Replays the most recent pageviews oldest first, then streams new ones as
/// they are ingested. A slow client skips what it missed instead of stalling
/// ingestion.
pub async fn live_events(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let mut subscription = state.live_feed.subscribe().await?;
    tracing::debug!(subscribers = state.live_feed.subscriber_count(), "live client connected");

    let stream = async_stream::stream! {
        for view in subscription.take_snapshot() {
            if let Some(event) = pageview_event(&view) {
                yield Ok(event);
            }
        }
        while let Some(view) = subscription.recv().await {
            if let Some(event) = pageview_event(&view) {
                yield Ok(event);
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn pageview_event(view: &PageView) -> Option<Event> {
    match Event::default().event(PAGEVIEW_EVENT).id(view.id.to_string()).json_data(view) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(id = view.id, error = %e, "failed to encode pageview event");
            None
        },
    }
}
