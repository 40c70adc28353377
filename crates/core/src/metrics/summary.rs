use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::round1;
use crate::session::Session;

/// Headline cards shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_visits: u64,
    pub active_sessions: u64,
    pub pages_per_session: f64,
    pub average_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceRate {
    /// Percentage in `0.0..=100.0`, one decimal.
    pub bounce_rate: f64,
    pub bounced_sessions: u64,
    pub total_sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_sessions: u64,
    pub average_duration: String,
    /// Formatted like `"42.5%"`.
    pub bounce_rate: String,
}

/// Pageviews per session rounded to one decimal; `0.0` without sessions.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "row counts stay far below 2^52")]
pub fn pages_per_session(page_views: u64, sessions: u64) -> f64 {
    if sessions == 0 {
        return 0.0;
    }
    round1(page_views as f64 / sessions as f64)
}

/// Mean session length in minutes, or `None` when there are no sessions.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "row counts stay far below 2^52")]
pub fn mean_duration_minutes(sessions: &[Session]) -> Option<f64> {
    if sessions.is_empty() {
        return None;
    }
    let total: f64 = sessions.iter().map(Session::duration_minutes).sum();
    Some(total / sessions.len() as f64)
}

/// `"0m"` with no sessions, `"< 1m"` under a minute, otherwise rounded minutes.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "rounded minutes fit in i64")]
pub fn format_average_duration(mean_minutes: Option<f64>) -> String {
    match mean_minutes {
        None => "0m".to_owned(),
        Some(m) if m < 1.0 => "< 1m".to_owned(),
        Some(m) => format!("{}m", m.round() as i64),
    }
}

#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Share of sessions with at most one pageview.
///
/// Sessions missing from `views_per_session` have zero pageviews and bounce.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "row counts stay far below 2^52")]
pub fn bounce_rate(sessions: &[Session], views_per_session: &HashMap<String, u64>) -> BounceRate {
    let total_sessions = sessions.len() as u64;
    let bounced_sessions = sessions
        .iter()
        .filter(|s| views_per_session.get(&s.id).copied().unwrap_or(0) <= 1)
        .count() as u64;
    let bounce_rate = if total_sessions == 0 {
        0.0
    } else {
        round1(bounced_sessions as f64 / total_sessions as f64 * 100.0)
    };
    BounceRate { bounce_rate, bounced_sessions, total_sessions }
}

#[must_use]
pub fn session_summary(
    sessions: &[Session],
    views_per_session: &HashMap<String, u64>,
) -> SessionSummary {
    let bounce = bounce_rate(sessions, views_per_session);
    SessionSummary {
        total_sessions: bounce.total_sessions,
        average_duration: format_average_duration(mean_duration_minutes(sessions)),
        bounce_rate: format_percentage(bounce.bounce_rate),
    }
}
