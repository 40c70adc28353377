//! Read-only dashboard endpoints. Each maps one analytics query to JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use bear_tracks_core::PageView;
use bear_tracks_core::metrics::{
    ActivePage, BounceRate, CountryVisits, DailyVisits, DurationBucketCount, HourlyHeatmap,
    Overview, PageFlow, Peaks, RealtimeSummary, SessionSummary, TimingSummary, WeekdayVisits,
};
use bear_tracks_storage::StorageStats;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{DaysQuery, LimitQuery};
use crate::response_types::{
    ActiveSessionsResponse, AverageDurationResponse, PagesPerSessionResponse, TotalVisitsResponse,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<StorageStats> {
    Ok(Json(state.analytics_service.stats().await?))
}

pub async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<Overview> {
    Ok(Json(state.analytics_service.overview().await?))
}

pub async fn total_visits(State(state): State<Arc<AppState>>) -> ApiResult<TotalVisitsResponse> {
    let total_visits = state.analytics_service.total_visits().await?;
    Ok(Json(TotalVisitsResponse { total_visits }))
}

pub async fn active_sessions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ActiveSessionsResponse> {
    let active_sessions = state.analytics_service.active_sessions().await?;
    Ok(Json(ActiveSessionsResponse { active_sessions }))
}

pub async fn pages_per_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<PagesPerSessionResponse> {
    let pages_per_session = state.analytics_service.pages_per_session().await?;
    Ok(Json(PagesPerSessionResponse { pages_per_session }))
}

pub async fn average_duration(
    State(state): State<Arc<AppState>>,
) -> ApiResult<AverageDurationResponse> {
    let average_duration = state.analytics_service.average_duration().await?;
    Ok(Json(AverageDurationResponse { average_duration }))
}

pub async fn daily_visits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Vec<DailyVisits>> {
    Ok(Json(state.analytics_service.daily_visits(query.capped_days()).await?))
}

pub async fn bounce_rate(State(state): State<Arc<AppState>>) -> ApiResult<BounceRate> {
    Ok(Json(state.analytics_service.bounce_rate().await?))
}

pub async fn session_durations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<DurationBucketCount>> {
    Ok(Json(state.analytics_service.session_durations().await?))
}

pub async fn session_summary(State(state): State<Arc<AppState>>) -> ApiResult<SessionSummary> {
    Ok(Json(state.analytics_service.session_summary().await?))
}

pub async fn page_flow(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PageFlow>> {
    Ok(Json(state.analytics_service.page_flow().await?))
}

pub async fn heatmap(State(state): State<Arc<AppState>>) -> ApiResult<HourlyHeatmap> {
    Ok(Json(state.analytics_service.heatmap().await?))
}

pub async fn peaks(State(state): State<Arc<AppState>>) -> ApiResult<Peaks> {
    Ok(Json(state.analytics_service.peaks().await?))
}

pub async fn timing(State(state): State<Arc<AppState>>) -> ApiResult<TimingSummary> {
    Ok(Json(state.analytics_service.timing_summary().await?))
}

pub async fn weekday_totals(State(state): State<Arc<AppState>>) -> ApiResult<Vec<WeekdayVisits>> {
    Ok(Json(state.analytics_service.weekday_totals().await?))
}

pub async fn geography(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CountryVisits>> {
    Ok(Json(state.analytics_service.geography().await?))
}

pub async fn active_pages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ActivePage>> {
    Ok(Json(state.analytics_service.active_pages().await?))
}

pub async fn realtime(State(state): State<Arc<AppState>>) -> ApiResult<RealtimeSummary> {
    Ok(Json(state.analytics_service.realtime().await?))
}

pub async fn recent_visits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<PageView>> {
    Ok(Json(state.analytics_service.recent_visits(query.capped_limit()).await?))
}
