use async_trait::async_trait;
use bear_tracks_core::Session;
use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// Session rows: create once, then only move `last_seen` forward.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session with `first_seen = last_seen = at`.
    ///
    /// Returns `false` and leaves the existing row untouched when the id is taken.
    async fn create_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError>;

    /// Atomically set `last_seen = max(last_seen, at)`.
    ///
    /// Returns `false` when no session has this id.
    async fn touch_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError>;

    /// Get session by id.
    async fn get_session(&self, id: &str) -> Result<Option<Session>, StorageError>;

    /// All sessions, oldest `first_seen` first.
    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError>;

    async fn count_sessions(&self) -> Result<u64, StorageError>;

    /// Sessions whose `last_seen` is strictly after `since`.
    async fn count_active_sessions(&self, since: DateTime<Utc>) -> Result<u64, StorageError>;
}
