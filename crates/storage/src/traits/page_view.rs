use std::collections::HashMap;

use async_trait::async_trait;
use bear_tracks_core::{NewPageView, PageView};
use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// Append-only pageview log.
///
/// Listing methods return rows in visit order (`created_at`, then `id`)
/// unless stated otherwise.
#[async_trait]
pub trait PageViewStore: Send + Sync {
    /// Append a pageview and return it with its store-assigned id.
    async fn append_page_view(&self, view: &NewPageView) -> Result<PageView, StorageError>;

    async fn count_page_views(&self) -> Result<u64, StorageError>;

    /// Pageviews created strictly after `since`.
    async fn count_page_views_since(&self, since: DateTime<Utc>) -> Result<u64, StorageError>;

    /// Pageviews created strictly after `since`, or all of them.
    async fn list_page_views(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, StorageError>;

    /// Most recent pageviews, newest first.
    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StorageError>;

    /// Pageviews referencing one session, entry page first.
    async fn session_page_views(&self, session_id: &str) -> Result<Vec<PageView>, StorageError>;

    /// Number of pageviews per referenced session id.
    async fn page_view_counts_by_session(&self) -> Result<HashMap<String, u64>, StorageError>;

    /// Number of pageviews per raw country value (`None` for missing).
    async fn page_view_counts_by_country(
        &self,
    ) -> Result<Vec<(Option<String>, u64)>, StorageError>;
}
