use std::sync::Arc;

use bear_tracks_core::constants::{
    ACTIVE_SESSION_WINDOW_MINUTES, MAX_QUERY_LIMIT, MAX_TREND_DAYS, REALTIME_PAGES_WINDOW_SECS,
    TOP_PAGES_LIMIT,
};
use bear_tracks_core::metrics::{
    self, ActivePage, BounceRate, CountryVisits, DailyVisits, DurationBucketCount, HourlyHeatmap,
    Overview, PageFlow, Peaks, RealtimeSummary, SessionSummary, TimingSummary, WeekdayVisits,
};
use bear_tracks_core::{PageView, Session};
use bear_tracks_storage::traits::{PageViewStore, SessionStore, StatsStore};
use bear_tracks_storage::{StorageBackend, StorageStats};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::Serialize;

use crate::error::ServiceError;

/// A session with its pageviews in entry-to-exit order.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    /// `None` when only dangling pageviews reference the id.
    pub session: Option<Session>,
    pub page_views: Vec<PageView>,
}

/// Read-only dashboard queries.
///
/// Loads rows through the storage traits and hands them to the pure
/// transforms in [`bear_tracks_core::metrics`]. Calendar and hour bucketing
/// use `tz`, the server-local zone unless built with [`Self::with_time_zone`].
pub struct AnalyticsService<Tz = Local> {
    storage: Arc<StorageBackend>,
    tz: Tz,
}

impl AnalyticsService<Local> {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage, tz: Local }
    }
}

impl<Tz> AnalyticsService<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    #[must_use]
    pub fn with_time_zone(storage: Arc<StorageBackend>, tz: Tz) -> Self {
        Self { storage, tz }
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.get_stats().await?)
    }

    pub async fn total_visits(&self) -> Result<u64, ServiceError> {
        Ok(self.storage.count_page_views().await?)
    }

    pub async fn active_sessions(&self) -> Result<u64, ServiceError> {
        self.active_sessions_at(Utc::now()).await
    }

    pub async fn active_sessions_at(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
        let since = now - Duration::minutes(ACTIVE_SESSION_WINDOW_MINUTES);
        Ok(self.storage.count_active_sessions(since).await?)
    }

    pub async fn pages_per_session(&self) -> Result<f64, ServiceError> {
        let views = self.storage.count_page_views().await?;
        let sessions = self.storage.count_sessions().await?;
        Ok(metrics::pages_per_session(views, sessions))
    }

    pub async fn average_duration(&self) -> Result<String, ServiceError> {
        let sessions = self.storage.list_sessions().await?;
        Ok(metrics::format_average_duration(metrics::mean_duration_minutes(&sessions)))
    }

    pub async fn overview(&self) -> Result<Overview, ServiceError> {
        self.overview_at(Utc::now()).await
    }

    pub async fn overview_at(&self, now: DateTime<Utc>) -> Result<Overview, ServiceError> {
        Ok(Overview {
            total_visits: self.total_visits().await?,
            active_sessions: self.active_sessions_at(now).await?,
            pages_per_session: self.pages_per_session().await?,
            average_duration: self.average_duration().await?,
        })
    }

    /// Daily pageview trend. `days` is clamped to [`MAX_TREND_DAYS`].
    pub async fn daily_visits(&self, days: u32) -> Result<Vec<DailyVisits>, ServiceError> {
        self.daily_visits_at(days, Utc::now()).await
    }

    pub async fn daily_visits_at(
        &self,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyVisits>, ServiceError> {
        let days = days.min(MAX_TREND_DAYS);
        // Two days of slack covers the local-midnight start of the window.
        let since = now - Duration::days(i64::from(days) + 2);
        let views = self.storage.list_page_views(Some(since)).await?;
        Ok(metrics::daily_visits(views.iter().map(|v| v.created_at), days, now, &self.tz))
    }

    pub async fn bounce_rate(&self) -> Result<BounceRate, ServiceError> {
        let sessions = self.storage.list_sessions().await?;
        let counts = self.storage.page_view_counts_by_session().await?;
        Ok(metrics::bounce_rate(&sessions, &counts))
    }

    pub async fn session_summary(&self) -> Result<SessionSummary, ServiceError> {
        let sessions = self.storage.list_sessions().await?;
        let counts = self.storage.page_view_counts_by_session().await?;
        Ok(metrics::session_summary(&sessions, &counts))
    }

    pub async fn session_durations(&self) -> Result<Vec<DurationBucketCount>, ServiceError> {
        let sessions = self.storage.list_sessions().await?;
        Ok(metrics::session_duration_histogram(&sessions))
    }

    pub async fn page_flow(&self) -> Result<Vec<PageFlow>, ServiceError> {
        let views = self.storage.list_page_views(None).await?;
        Ok(metrics::page_flow(&views, TOP_PAGES_LIMIT))
    }

    pub async fn heatmap(&self) -> Result<HourlyHeatmap, ServiceError> {
        let views = self.storage.list_page_views(None).await?;
        Ok(metrics::hourly_heatmap(views.iter().map(|v| v.created_at), &self.tz))
    }

    pub async fn peaks(&self) -> Result<Peaks, ServiceError> {
        Ok(self.heatmap().await?.peaks())
    }

    pub async fn timing_summary(&self) -> Result<TimingSummary, ServiceError> {
        Ok(metrics::timing_summary(&self.heatmap().await?))
    }

    pub async fn weekday_totals(&self) -> Result<Vec<WeekdayVisits>, ServiceError> {
        let views = self.storage.list_page_views(None).await?;
        Ok(metrics::weekday_totals(views.iter().map(|v| v.created_at), &self.tz))
    }

    pub async fn geography(&self) -> Result<Vec<CountryVisits>, ServiceError> {
        let counts = self.storage.page_view_counts_by_country().await?;
        Ok(metrics::country_breakdown(counts))
    }

    pub async fn active_pages(&self) -> Result<Vec<ActivePage>, ServiceError> {
        self.active_pages_at(Utc::now()).await
    }

    pub async fn active_pages_at(&self, now: DateTime<Utc>) -> Result<Vec<ActivePage>, ServiceError> {
        let since = now - Duration::minutes(ACTIVE_SESSION_WINDOW_MINUTES);
        let views = self.storage.list_page_views(Some(since)).await?;
        Ok(metrics::active_pages(views.iter().map(|v| v.page_url.as_str()), TOP_PAGES_LIMIT))
    }

    pub async fn realtime(&self) -> Result<RealtimeSummary, ServiceError> {
        self.realtime_at(Utc::now()).await
    }

    pub async fn realtime_at(&self, now: DateTime<Utc>) -> Result<RealtimeSummary, ServiceError> {
        let since = now - Duration::seconds(REALTIME_PAGES_WINDOW_SECS);
        Ok(RealtimeSummary {
            active_visitors: self.active_sessions_at(now).await?,
            pages_last_minute: self.storage.count_page_views_since(since).await?,
        })
    }

    /// Newest pageviews first, at most [`MAX_QUERY_LIMIT`].
    pub async fn recent_visits(&self, limit: usize) -> Result<Vec<PageView>, ServiceError> {
        Ok(self.storage.recent_page_views(limit.min(MAX_QUERY_LIMIT)).await?)
    }

    /// `None` when neither a session row nor any pageview carries this id.
    pub async fn session_detail(&self, id: &str) -> Result<Option<SessionDetail>, ServiceError> {
        let session = self.storage.get_session(id).await?;
        let page_views = self.storage.session_page_views(id).await?;
        if session.is_none() && page_views.is_empty() {
            return Ok(None);
        }
        Ok(Some(SessionDetail { session, page_views }))
    }
}
