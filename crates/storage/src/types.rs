//! Storage types shared across modules

use serde::{Deserialize, Serialize};

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    pub session_count: u64,
    pub page_view_count: u64,
}
