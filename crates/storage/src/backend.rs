//! Unified storage backend with enum dispatch.

use std::collections::HashMap;
#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use bear_tracks_core::{NewPageView, PageView, Session};
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::traits::{PageViewStore, SessionStore, StatsStore};
use crate::types::StorageStats;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs and the version endpoint.
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── SessionStore ─────────────────────────────────────────────────

#[async_trait]
impl SessionStore for StorageBackend {
    async fn create_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        dispatch!(self, SessionStore, create_session(id, at))
    }

    async fn touch_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        dispatch!(self, SessionStore, touch_session(id, at))
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, StorageError> {
        dispatch!(self, SessionStore, get_session(id))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        dispatch!(self, SessionStore, list_sessions())
    }

    async fn count_sessions(&self) -> Result<u64, StorageError> {
        dispatch!(self, SessionStore, count_sessions())
    }

    async fn count_active_sessions(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        dispatch!(self, SessionStore, count_active_sessions(since))
    }
}

// ── PageViewStore ────────────────────────────────────────────────

#[async_trait]
impl PageViewStore for StorageBackend {
    async fn append_page_view(&self, view: &NewPageView) -> Result<PageView, StorageError> {
        dispatch!(self, PageViewStore, append_page_view(view))
    }

    async fn count_page_views(&self) -> Result<u64, StorageError> {
        dispatch!(self, PageViewStore, count_page_views())
    }

    async fn count_page_views_since(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        dispatch!(self, PageViewStore, count_page_views_since(since))
    }

    async fn list_page_views(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, StorageError> {
        dispatch!(self, PageViewStore, list_page_views(since))
    }

    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StorageError> {
        dispatch!(self, PageViewStore, recent_page_views(limit))
    }

    async fn session_page_views(&self, session_id: &str) -> Result<Vec<PageView>, StorageError> {
        dispatch!(self, PageViewStore, session_page_views(session_id))
    }

    async fn page_view_counts_by_session(&self) -> Result<HashMap<String, u64>, StorageError> {
        dispatch!(self, PageViewStore, page_view_counts_by_session())
    }

    async fn page_view_counts_by_country(
        &self,
    ) -> Result<Vec<(Option<String>, u64)>, StorageError> {
        dispatch!(self, PageViewStore, page_view_counts_by_country())
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        dispatch!(self, StatsStore, get_stats())
    }
}
