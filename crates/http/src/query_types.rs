//! Request/query types (Deserialize)

use bear_tracks_core::constants::{
    DEFAULT_RECENT_LIMIT, DEFAULT_TREND_DAYS, MAX_QUERY_LIMIT, MAX_TREND_DAYS,
};
use serde::Deserialize;

const fn default_days() -> u32 {
    DEFAULT_TREND_DAYS
}

const fn default_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

impl DaysQuery {
    /// Cap the window to prevent unbounded scans.
    pub fn capped_days(&self) -> u32 {
        self.days.min(MAX_TREND_DAYS)
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl LimitQuery {
    /// Cap limit to prevent DoS via unbounded queries.
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_QUERY_LIMIT)
    }
}
