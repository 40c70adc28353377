#![allow(dead_code, reason = "shared by several test binaries")]

use std::sync::Arc;

use bear_tracks_service::{AnalyticsService, LiveFeed, TrackingService};
use bear_tracks_storage::StorageBackend;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

pub struct Harness {
    pub storage: Arc<StorageBackend>,
    pub live_feed: Arc<LiveFeed>,
    pub tracking: TrackingService,
    pub analytics: AnalyticsService<Utc>,
    _temp_dir: TempDir,
}

pub fn harness() -> Harness {
    harness_with_capacity(64)
}

pub fn harness_with_capacity(capacity: usize) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(StorageBackend::new_sqlite(&temp_dir.path().join("tracks.db")).unwrap());
    let live_feed = Arc::new(LiveFeed::with_capacity(Arc::clone(&storage), capacity));
    Harness {
        tracking: TrackingService::new(Arc::clone(&storage), Arc::clone(&live_feed)),
        analytics: AnalyticsService::with_time_zone(Arc::clone(&storage), Utc),
        storage,
        live_feed,
        _temp_dir: temp_dir,
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).single().unwrap()
}
