use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use bear_tracks_core::TrackEvent;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{TrackRequest, TrackResponse};

/// Country header set by the edge proxy.
const COUNTRY_HEADER: &str = "cf-ipcountry";

/// `POST /api/track`
///
/// The body is parsed as JSON whatever the content type, since
/// `navigator.sendBeacon` posts strings as `text/plain`.
pub async fn track(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TrackResponse>, ApiError> {
    let req: TrackRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid tracking payload: {e}")))?;
    let page_url = req
        .page_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("pageUrl is required".to_owned()))?;

    let event = TrackEvent {
        session_token: req.session_id,
        page_url,
        referrer: req.referrer,
        user_agent: header_value(&headers, USER_AGENT.as_str()),
        country: header_value(&headers, COUNTRY_HEADER),
    };
    let outcome = state.tracking_service.ingest(event).await?;
    Ok(Json(TrackResponse { session_id: outcome.session_token }))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}
