//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use std::collections::HashMap;

use async_trait::async_trait;
use bear_tracks_core::{NewPageView, PageView, Session};
use chrono::{DateTime, Utc};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{PageViewStore, SessionStore, StatsStore};
use crate::types::StorageStats;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`      — `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`      — `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`      — move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── SessionStore ─────────────────────────────────────────────────

#[async_trait]
impl SessionStore for Storage {
    async fn create_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        delegate!(self, create_session, @str id, @val at)
    }
    async fn touch_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        delegate!(self, touch_session, @str id, @val at)
    }
    async fn get_session(&self, id: &str) -> Result<Option<Session>, StorageError> {
        delegate!(self, get_session, @str id)
    }
    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        delegate!(self, list_sessions)
    }
    async fn count_sessions(&self) -> Result<u64, StorageError> {
        delegate!(self, count_sessions)
    }
    async fn count_active_sessions(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        delegate!(self, count_active_sessions, @val since)
    }
}

// ── PageViewStore ────────────────────────────────────────────────

#[async_trait]
impl PageViewStore for Storage {
    async fn append_page_view(&self, view: &NewPageView) -> Result<PageView, StorageError> {
        delegate!(self, append_page_view, @ref view)
    }
    async fn count_page_views(&self) -> Result<u64, StorageError> {
        delegate!(self, count_page_views)
    }
    async fn count_page_views_since(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        delegate!(self, count_page_views_since, @val since)
    }
    async fn list_page_views(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, StorageError> {
        delegate!(self, list_page_views, @val since)
    }
    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StorageError> {
        delegate!(self, recent_page_views, @val limit)
    }
    async fn session_page_views(&self, session_id: &str) -> Result<Vec<PageView>, StorageError> {
        delegate!(self, session_page_views, @str session_id)
    }
    async fn page_view_counts_by_session(&self) -> Result<HashMap<String, u64>, StorageError> {
        delegate!(self, page_view_counts_by_session)
    }
    async fn page_view_counts_by_country(
        &self,
    ) -> Result<Vec<(Option<String>, u64)>, StorageError> {
        delegate!(self, page_view_counts_by_country)
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for Storage {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        delegate!(self, get_stats)
    }
}
