//! Test utilities and module declarations for storage tests.

use bear_tracks_core::{DeviceType, NewPageView};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::{Storage, StorageBackend};

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_backend() -> (StorageBackend, TempDir) {
    let (storage, temp_dir) = create_test_storage();
    (StorageBackend::Sqlite(storage), temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_718_000_000 + secs, 0).single().unwrap()
}

pub fn new_view(session_id: &str, url: &str, created_at: DateTime<Utc>) -> NewPageView {
    NewPageView {
        session_id: session_id.to_owned(),
        page_url: url.to_owned(),
        referrer: None,
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_owned()),
        country: Some("US".to_owned()),
        device_type: Some(DeviceType::Desktop),
        created_at,
    }
}

mod page_view_tests;
mod session_tests;
