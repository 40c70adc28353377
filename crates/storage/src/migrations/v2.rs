//! Migration v2: indexes for the time-windowed dashboard queries

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_pageviews_created ON pageviews(created_at, id);
CREATE INDEX IF NOT EXISTS idx_sessions_last_seen ON sessions(last_seen);

PRAGMA user_version = 2;
";
