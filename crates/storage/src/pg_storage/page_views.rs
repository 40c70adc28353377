//! PageViewStore implementation for PgStorage.

use std::collections::HashMap;

use async_trait::async_trait;
use bear_tracks_core::{NewPageView, PageView};
use chrono::{DateTime, Utc};

use super::{PAGE_VIEW_COLUMNS, PgStorage, count_to_u64, row_to_page_view};
use crate::error::StorageError;
use crate::traits::PageViewStore;

#[async_trait]
impl PageViewStore for PgStorage {
    async fn append_page_view(&self, view: &NewPageView) -> Result<PageView, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO pageviews
               (session_id, page_url, referrer, user_agent, country, device_type, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PAGE_VIEW_COLUMNS}"
        ))
        .bind(&view.session_id)
        .bind(&view.page_url)
        .bind(&view.referrer)
        .bind(&view.user_agent)
        .bind(&view.country)
        .bind(view.device_type.map(|d| d.as_str()))
        .bind(view.created_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_page_view(&row)
    }

    async fn count_page_views(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pageviews").fetch_one(&self.pool).await?;
        Ok(count_to_u64(count))
    }

    async fn count_page_views_since(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pageviews WHERE created_at > $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count_to_u64(count))
    }

    async fn list_page_views(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews
             WHERE $1::timestamptz IS NULL OR created_at > $1
             ORDER BY created_at, id"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_page_view).collect()
    }

    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_page_view).collect()
    }

    async fn session_page_views(&self, session_id: &str) -> Result<Vec<PageView>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews WHERE session_id = $1 ORDER BY created_at, id"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_page_view).collect()
    }

    async fn page_view_counts_by_session(&self) -> Result<HashMap<String, u64>, StorageError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT session_id, COUNT(*) FROM pageviews GROUP BY session_id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id, count)| (id, count_to_u64(count))).collect())
    }

    async fn page_view_counts_by_country(
        &self,
    ) -> Result<Vec<(Option<String>, u64)>, StorageError> {
        let rows: Vec<(Option<String>, i64)> =
            sqlx::query_as("SELECT country, COUNT(*) FROM pageviews GROUP BY country")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(country, count)| (country, count_to_u64(count))).collect())
    }
}
