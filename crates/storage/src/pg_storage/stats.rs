//! StatsStore implementation for PgStorage.

use async_trait::async_trait;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::{PageViewStore, SessionStore, StatsStore};
use crate::types::StorageStats;

#[async_trait]
impl StatsStore for PgStorage {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            session_count: self.count_sessions().await?,
            page_view_count: self.count_page_views().await?,
        })
    }
}
