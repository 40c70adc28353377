//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p bear-tracks-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use bear_tracks_core::{DeviceType, NewPageView};
use bear_tracks_storage::PgStorage;
use bear_tracks_storage::traits::{PageViewStore, SessionStore, StatsStore};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_id() -> String {
    format!("test-{}", Uuid::new_v4())
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn make_view(session_id: &str, url: &str, created_at: DateTime<Utc>) -> NewPageView {
    NewPageView {
        session_id: session_id.to_owned(),
        page_url: url.to_owned(),
        referrer: Some("https://example.com/".to_owned()),
        user_agent: Some("Mozilla/5.0 (iPhone) Mobile".to_owned()),
        country: Some("DE".to_owned()),
        device_type: Some(DeviceType::Mobile),
        created_at,
    }
}

#[tokio::test]
#[ignore]
async fn pg_create_session_is_insert_once() {
    let storage = create_pg_storage().await;
    let id = unique_id();
    let t0 = now();

    assert!(storage.create_session(&id, t0).await.unwrap());
    assert!(!storage.create_session(&id, t0 + Duration::minutes(5)).await.unwrap());

    let session = storage.get_session(&id).await.unwrap().unwrap();
    assert_eq!(session.first_seen, t0);
    assert_eq!(session.last_seen, t0);
}

#[tokio::test]
#[ignore]
async fn pg_touch_is_monotonic() {
    let storage = create_pg_storage().await;
    let id = unique_id();
    let t0 = now();
    storage.create_session(&id, t0).await.unwrap();

    storage.touch_session(&id, t0 + Duration::seconds(30)).await.unwrap();
    storage.touch_session(&id, t0 + Duration::seconds(10)).await.unwrap();

    let session = storage.get_session(&id).await.unwrap().unwrap();
    assert_eq!(session.last_seen, t0 + Duration::seconds(30));
    assert!(!storage.touch_session(&unique_id(), t0).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn pg_append_and_read_back_in_visit_order() {
    let storage = create_pg_storage().await;
    let id = unique_id();
    let t0 = now();

    let first = storage.append_page_view(&make_view(&id, "/a", t0)).await.unwrap();
    let second = storage.append_page_view(&make_view(&id, "/b", t0)).await.unwrap();
    assert!(second.id > first.id);
    assert_eq!(first.device_type, Some(DeviceType::Mobile));

    let views = storage.session_page_views(&id).await.unwrap();
    let urls: Vec<&str> = views.iter().map(|v| v.page_url.as_str()).collect();
    assert_eq!(urls, vec!["/a", "/b"]);

    let counts = storage.page_view_counts_by_session().await.unwrap();
    assert_eq!(counts.get(&id), Some(&2));

    let since = storage.list_page_views(Some(t0 - Duration::seconds(1))).await.unwrap();
    assert!(since.iter().any(|v| v.id == second.id));
    assert!(storage.get_stats().await.unwrap().page_view_count >= 2);
}
