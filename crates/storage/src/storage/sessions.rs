use bear_tracks_core::Session;
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};

use super::{Storage, count_to_u64, decode_ts, encode_ts, get_conn};
use crate::error::StorageError;

fn row_to_session(row: &Row<'_>) -> Result<Session, StorageError> {
    let first_seen: String = row.get(1)?;
    let last_seen: String = row.get(2)?;
    Ok(Session { id: row.get(0)?, first_seen: decode_ts(&first_seen)?, last_seen: decode_ts(&last_seen)? })
}

impl Storage {
    /// Create a session unless the id already exists.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn create_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO sessions (id, first_seen, last_seen) VALUES (?1, ?2, ?2)",
            params![id, encode_ts(&at)],
        )?;
        Ok(inserted == 1)
    }

    /// Move `last_seen` forward to `at`; never backwards.
    ///
    /// # Errors
    /// Returns error if database update fails.
    pub fn touch_session(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let updated = conn.execute(
            "UPDATE sessions SET last_seen = MAX(last_seen, ?1) WHERE id = ?2",
            params![encode_ts(&at), id],
        )?;
        Ok(updated > 0)
    }

    /// Get session by ID.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_session(&self, id: &str) -> Result<Option<Session>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT id, first_seen, last_seen FROM sessions WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row_to_session(row)?))
        } else {
            Ok(None)
        }
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare("SELECT id, first_seen, last_seen FROM sessions ORDER BY first_seen, id")?;
        let mut rows = stmt.query([])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(row_to_session(row)?);
        }
        Ok(sessions)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn count_sessions(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |r| r.get(0))?;
        Ok(count_to_u64(count))
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn count_active_sessions(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE last_seen > ?1",
            params![encode_ts(&since)],
            |r| r.get(0),
        )?;
        Ok(count_to_u64(count))
    }
}
