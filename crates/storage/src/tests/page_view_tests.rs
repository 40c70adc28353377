use bear_tracks_core::DeviceType;

use super::{create_test_backend, create_test_storage, new_view, ts};
use crate::traits::{PageViewStore, SessionStore, StatsStore};

#[test]
fn test_append_assigns_increasing_ids() {
    let (storage, _temp_dir) = create_test_storage();

    let first = storage.append_page_view(&new_view("s", "/home", ts(0))).unwrap();
    let second = storage.append_page_view(&new_view("s", "/pricing", ts(1))).unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.page_url, "/home");
    assert_eq!(first.device_type, Some(DeviceType::Desktop));
    assert_eq!(storage.count_page_views().unwrap(), 2);
}

#[test]
fn test_append_allows_dangling_session() {
    let (storage, _temp_dir) = create_test_storage();

    let view = storage.append_page_view(&new_view("no-such-session", "/", ts(0))).unwrap();

    assert_eq!(view.session_id, "no-such-session");
    assert!(storage.get_session("no-such-session").unwrap().is_none());
}

#[test]
fn test_optional_fields_round_trip_as_null() {
    let (storage, _temp_dir) = create_test_storage();
    let mut view = new_view("s", "/bare", ts(0));
    view.user_agent = None;
    view.country = None;
    view.device_type = None;
    view.referrer = None;

    storage.append_page_view(&view).unwrap();

    let stored = storage.session_page_views("s").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].country, None);
    assert_eq!(stored[0].device_type, None);
}

#[test]
fn test_list_since_is_ordered_and_strict() {
    let (storage, _temp_dir) = create_test_storage();
    storage.append_page_view(&new_view("s", "/b", ts(20))).unwrap();
    storage.append_page_view(&new_view("s", "/a", ts(10))).unwrap();
    storage.append_page_view(&new_view("s", "/c", ts(30))).unwrap();

    let all: Vec<String> =
        storage.list_page_views(None).unwrap().into_iter().map(|v| v.page_url).collect();
    assert_eq!(all, vec!["/a", "/b", "/c"]);

    let since: Vec<String> =
        storage.list_page_views(Some(ts(10))).unwrap().into_iter().map(|v| v.page_url).collect();
    assert_eq!(since, vec!["/b", "/c"]);
    assert_eq!(storage.count_page_views_since(ts(20)).unwrap(), 1);
}

#[test]
fn test_same_timestamp_orders_by_id() {
    let (storage, _temp_dir) = create_test_storage();
    storage.append_page_view(&new_view("s", "/first", ts(5))).unwrap();
    storage.append_page_view(&new_view("s", "/second", ts(5))).unwrap();

    let views = storage.session_page_views("s").unwrap();
    assert_eq!(views[0].page_url, "/first");
    assert_eq!(views[1].page_url, "/second");

    let recent = storage.recent_page_views(1).unwrap();
    assert_eq!(recent[0].page_url, "/second");
}

#[test]
fn test_recent_page_views_newest_first_and_limited() {
    let (storage, _temp_dir) = create_test_storage();
    for i in 0..5 {
        storage.append_page_view(&new_view("s", &format!("/p{i}"), ts(i))).unwrap();
    }

    let recent: Vec<String> =
        storage.recent_page_views(3).unwrap().into_iter().map(|v| v.page_url).collect();
    assert_eq!(recent, vec!["/p4", "/p3", "/p2"]);
}

#[test]
fn test_group_counts() {
    let (storage, _temp_dir) = create_test_storage();
    storage.append_page_view(&new_view("a", "/", ts(0))).unwrap();
    storage.append_page_view(&new_view("a", "/x", ts(1))).unwrap();
    let mut unknown = new_view("b", "/", ts(2));
    unknown.country = None;
    storage.append_page_view(&unknown).unwrap();

    let by_session = storage.page_view_counts_by_session().unwrap();
    assert_eq!(by_session.get("a"), Some(&2));
    assert_eq!(by_session.get("b"), Some(&1));

    let mut by_country = storage.page_view_counts_by_country().unwrap();
    by_country.sort();
    assert_eq!(by_country, vec![(None, 1), (Some("US".to_owned()), 2)]);
}

#[tokio::test]
async fn test_backend_dispatch_and_stats() {
    let (backend, _temp_dir) = create_test_backend();
    assert_eq!(backend.kind(), "sqlite");

    backend.create_session("s", ts(0)).await.unwrap();
    backend.append_page_view(&new_view("s", "/", ts(0))).await.unwrap();
    backend.append_page_view(&new_view("s", "/docs", ts(3))).await.unwrap();

    let stats = backend.get_stats().await.unwrap();
    assert_eq!(stats.session_count, 1);
    assert_eq!(stats.page_view_count, 2);

    let views = backend.session_page_views("s").await.unwrap();
    assert_eq!(views.len(), 2);
}

#[tokio::test]
async fn test_storage_survives_reopen() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("tracks.db");
    {
        let backend = crate::StorageBackend::new_sqlite(&db_path).unwrap();
        backend.create_session("s", ts(0)).await.unwrap();
    }
    let backend = crate::StorageBackend::new_sqlite(&db_path).unwrap();
    assert_eq!(backend.count_sessions().await.unwrap(), 1);
}
