//! SessionStore implementation for PgStorage.

use async_trait::async_trait;
use bear_tracks_core::Session;
use chrono::{DateTime, Utc};

use super::{PgStorage, SESSION_COLUMNS, count_to_u64, row_to_session};
use crate::error::StorageError;
use crate::traits::SessionStore;

#[async_trait]
impl SessionStore for PgStorage {
    async fn create_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT INTO sessions (id, first_seen, last_seen) VALUES ($1, $2, $2)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn touch_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        let result =
            sqlx::query("UPDATE sessions SET last_seen = GREATEST(last_seen, $1) WHERE id = $2")
                .bind(at)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query(&format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_session(&r)).transpose()
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        let rows =
            sqlx::query(&format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY first_seen, id"))
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(row_to_session).collect()
    }

    async fn count_sessions(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions").fetch_one(&self.pool).await?;
        Ok(count_to_u64(count))
    }

    async fn count_active_sessions(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE last_seen > $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(count_to_u64(count))
    }
}
