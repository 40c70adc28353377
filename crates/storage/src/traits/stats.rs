use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::StorageStats;

/// Aggregate statistics.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Get storage statistics.
    async fn get_stats(&self) -> Result<StorageStats, StorageError>;
}
