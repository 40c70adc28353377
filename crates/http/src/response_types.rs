//! Response types for single-value metric endpoints (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TotalVisitsResponse {
    pub total_visits: u64,
}

#[derive(Debug, Serialize)]
pub struct ActiveSessionsResponse {
    pub active_sessions: u64,
}

#[derive(Debug, Serialize)]
pub struct PagesPerSessionResponse {
    pub pages_per_session: f64,
}

#[derive(Debug, Serialize)]
pub struct AverageDurationResponse {
    pub average_duration: String,
}
