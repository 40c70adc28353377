use super::Storage;
use crate::error::StorageError;
use crate::types::StorageStats;

impl Storage {
    /// Get storage statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            session_count: self.count_sessions()?,
            page_view_count: self.count_page_views()?,
        })
    }
}
