//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod page_views;
mod sessions;
mod stats;

use bear_tracks_core::constants::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use bear_tracks_core::{DeviceType, PageView, Session};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;
use crate::error::StorageError;

pub(crate) const SESSION_COLUMNS: &str = "id, first_seen, last_seen";

pub(crate) const PAGE_VIEW_COLUMNS: &str =
    "id, session_id, page_url, referrer, user_agent, country, device_type, created_at";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

pub(crate) fn row_to_session(row: &sqlx::postgres::PgRow) -> Result<Session, StorageError> {
    Ok(Session {
        id: row.try_get("id")?,
        first_seen: row.try_get::<DateTime<Utc>, _>("first_seen")?,
        last_seen: row.try_get::<DateTime<Utc>, _>("last_seen")?,
    })
}

/// Parse `DeviceType` from an optional PostgreSQL text column.
pub(crate) fn parse_pg_device_type(s: Option<&str>) -> Option<DeviceType> {
    s.and_then(|s| match s.parse::<DeviceType>() {
        Ok(device) => Some(device),
        Err(e) => {
            tracing::warn!(error = %e, "corrupt device_type in DB, ignoring");
            None
        },
    })
}

pub(crate) fn row_to_page_view(row: &sqlx::postgres::PgRow) -> Result<PageView, StorageError> {
    Ok(PageView {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        page_url: row.try_get("page_url")?,
        referrer: row.try_get("referrer")?,
        user_agent: row.try_get("user_agent")?,
        country: row.try_get("country")?,
        device_type: parse_pg_device_type(row.try_get::<Option<String>, _>("device_type")?.as_deref()),
        created_at: row.try_get("created_at")?,
    })
}
