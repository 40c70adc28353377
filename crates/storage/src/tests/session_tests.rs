use std::sync::Arc;

use chrono::Duration;

use super::{create_test_backend, create_test_storage, ts};
use crate::traits::SessionStore;

#[test]
fn test_create_and_get_session() {
    let (storage, _temp_dir) = create_test_storage();

    assert!(storage.create_session("session-1", ts(0)).unwrap());

    let retrieved = storage.get_session("session-1").unwrap().unwrap();
    assert_eq!(retrieved.id, "session-1");
    assert_eq!(retrieved.first_seen, ts(0));
    assert_eq!(retrieved.last_seen, ts(0));
}

#[test]
fn test_create_session_conflict_keeps_original_row() {
    let (storage, _temp_dir) = create_test_storage();

    assert!(storage.create_session("dup", ts(0)).unwrap());
    assert!(!storage.create_session("dup", ts(500)).unwrap());

    let retrieved = storage.get_session("dup").unwrap().unwrap();
    assert_eq!(retrieved.first_seen, ts(0));
    assert_eq!(storage.count_sessions().unwrap(), 1);
}

#[test]
fn test_touch_moves_last_seen_forward_only() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_session("s", ts(100)).unwrap();

    assert!(storage.touch_session("s", ts(400)).unwrap());
    assert!(storage.touch_session("s", ts(200)).unwrap());

    let session = storage.get_session("s").unwrap().unwrap();
    assert_eq!(session.first_seen, ts(100));
    assert_eq!(session.last_seen, ts(400));
}

#[test]
fn test_touch_with_earlier_clock_than_creation() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_session("s", ts(100)).unwrap();

    storage.touch_session("s", ts(50)).unwrap();

    let session = storage.get_session("s").unwrap().unwrap();
    assert!(session.last_seen >= session.first_seen);
    assert_eq!(session.last_seen, ts(100));
}

#[test]
fn test_touch_unknown_session_reports_missing() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(!storage.touch_session("ghost", ts(0)).unwrap());
    assert!(storage.get_session("ghost").unwrap().is_none());
}

#[test]
fn test_count_active_sessions_uses_strict_window() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_session("old", ts(0)).unwrap();
    storage.create_session("edge", ts(600)).unwrap();
    storage.create_session("fresh", ts(1200)).unwrap();

    assert_eq!(storage.count_active_sessions(ts(600)).unwrap(), 1);
    assert_eq!(storage.count_active_sessions(ts(-1)).unwrap(), 3);
}

#[test]
fn test_list_sessions_ordered_by_first_seen() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_session("b", ts(20)).unwrap();
    storage.create_session("a", ts(10)).unwrap();

    let ids: Vec<String> = storage.list_sessions().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_sub_second_timestamps_keep_order() {
    let (storage, _temp_dir) = create_test_storage();
    let base = ts(0);
    storage.create_session("s", base).unwrap();
    storage.touch_session("s", base + Duration::microseconds(999_999)).unwrap();
    storage.touch_session("s", base + Duration::microseconds(10)).unwrap();

    let session = storage.get_session("s").unwrap().unwrap();
    assert_eq!(session.last_seen, base + Duration::microseconds(999_999));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_touches_keep_maximum() {
    let (backend, _temp_dir) = create_test_backend();
    let backend = Arc::new(backend);
    backend.create_session("busy", ts(0)).await.unwrap();

    let mut handles = Vec::new();
    for offset in [30_i64, 5, 90, 60, 15, 75, 45, 10] {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move { backend.touch_session("busy", ts(offset)).await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let session = backend.get_session("busy").await.unwrap().unwrap();
    assert_eq!(session.first_seen, ts(0));
    assert_eq!(session.last_seen, ts(90));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_insert_once() {
    let (backend, _temp_dir) = create_test_backend();
    let backend = Arc::new(backend);

    let mut handles = Vec::new();
    for offset in 0..6_i64 {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move { backend.create_session("same", ts(offset)).await }));
    }
    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(backend.count_sessions().await.unwrap(), 1);
}
