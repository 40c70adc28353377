use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use bear_tracks_service::SessionDetail;

use crate::AppState;
use crate::api_error::ApiError;

/// `GET /api/sessions/{id}`: session row plus its pageviews in visit order.
pub async fn get_session_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetail>, ApiError> {
    state
        .analytics_service
        .session_detail(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("session '{id}' not found")))
}
