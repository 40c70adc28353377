//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` bridges them onto the async
//! traits through `spawn_blocking`. Timestamps are stored as fixed-width
//! RFC 3339 UTC text with microsecond precision so lexical order matches
//! chronological order and scalar `MAX()` works on them.

// SQLite uses i64 for counts/limits, Rust uses u64/usize
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust u64/usize conversions are safe within DB row counts"
)]

mod page_views;
mod sessions;
mod stats;

use std::path::Path;

use bear_tracks_core::constants::{DEFAULT_SQLITE_POOL_SIZE, ENV_DB_POOL_SIZE};
use bear_tracks_core::env_config::env_parse_with_default;
use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::corrupt(format!("invalid timestamp {raw:?}"), e))
}

pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

/// Concurrency settings applied to every pooled connection
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl Storage {
    /// Open (or create) the database at `db_path` and bring its schema up to date.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(Box::new(e)))?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = env_parse_with_default(ENV_DB_POOL_SIZE, DEFAULT_SQLITE_POOL_SIZE).max(1);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
