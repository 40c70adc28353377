use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::DeviceType;

/// A stored pageview. Append-only once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// Store-assigned, monotonically increasing.
    pub id: i64,
    /// May reference a session that does not exist.
    pub session_id: String,
    pub page_url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub device_type: Option<DeviceType>,
    pub created_at: DateTime<Utc>,
}

/// A pageview before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPageView {
    pub session_id: String,
    pub page_url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub device_type: Option<DeviceType>,
    pub created_at: DateTime<Utc>,
}

impl NewPageView {
    #[must_use]
    pub fn into_page_view(self, id: i64) -> PageView {
        PageView {
            id,
            session_id: self.session_id,
            page_url: self.page_url,
            referrer: self.referrer,
            user_agent: self.user_agent,
            country: self.country,
            device_type: self.device_type,
            created_at: self.created_at,
        }
    }
}

impl PageView {
    /// Sort key giving the canonical visit order: `created_at`, then `id`.
    #[must_use]
    pub fn visit_order(&self) -> (DateTime<Utc>, i64) {
        (self.created_at, self.id)
    }
}
