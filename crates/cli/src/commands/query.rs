use std::sync::Arc;

use anyhow::Result;
use bear_tracks_service::AnalyticsService;
use bear_tracks_storage::StorageBackend;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_stats(storage: Arc<StorageBackend>) -> Result<()> {
    print_json(&AnalyticsService::new(storage).stats().await?)
}

pub(crate) async fn run_overview(storage: Arc<StorageBackend>) -> Result<()> {
    print_json(&AnalyticsService::new(storage).overview().await?)
}

pub(crate) async fn run_recent(storage: Arc<StorageBackend>, limit: usize) -> Result<()> {
    print_json(&AnalyticsService::new(storage).recent_visits(limit).await?)
}

pub(crate) async fn run_session(storage: Arc<StorageBackend>, id: &str) -> Result<()> {
    match AnalyticsService::new(storage).session_detail(id).await? {
        Some(detail) => print_json(&detail),
        None => anyhow::bail!("session not found: {id}"),
    }
}
