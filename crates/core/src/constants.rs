//! Shared constants for bear-tracks.
//!
//! Centralizes window sizes and limits used by more than one crate.

/// A session counts as active while its `last_seen` is newer than this.
pub const ACTIVE_SESSION_WINDOW_MINUTES: i64 = 30;

/// Window for the "pages in the last minute" realtime figure.
pub const REALTIME_PAGES_WINDOW_SECS: i64 = 60;

/// Rows sent to a live subscriber on (re)connect, and the size of the
/// most-recent view each subscriber keeps.
pub const LIVE_SNAPSHOT_SIZE: usize = 20;

/// Default capacity of the live broadcast ring.
pub const DEFAULT_LIVE_CHANNEL_CAPACITY: usize = 256;

/// Rows returned by the page flow and active pages rankings.
pub const TOP_PAGES_LIMIT: usize = 10;

/// Days before today covered by the daily trend when the caller does not say.
pub const DEFAULT_TREND_DAYS: u32 = 7;

/// Upper bound on the daily trend window (DoS protection).
pub const MAX_TREND_DAYS: u32 = 366;

/// Default number of rows for the recent visitors list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Maximum number of rows for any list query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// SQLite connection pool: default maximum connections.
pub const DEFAULT_SQLITE_POOL_SIZE: u32 = 8;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding the SQLite pool size.
pub const ENV_DB_POOL_SIZE: &str = "BEAR_TRACKS_DB_POOL_SIZE";

/// Environment variable overriding the live broadcast capacity.
pub const ENV_LIVE_CAPACITY: &str = "BEAR_TRACKS_LIVE_CAPACITY";
