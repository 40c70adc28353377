//! PostgreSQL schema migrations for bear-tracks storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            first_seen TIMESTAMPTZ NOT NULL,
            last_seen TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pageviews (
            id BIGSERIAL PRIMARY KEY,
            session_id TEXT NOT NULL,
            page_url TEXT NOT NULL,
            referrer TEXT,
            user_agent TEXT,
            country TEXT,
            device_type TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pageviews_session ON pageviews (session_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pageviews_created ON pageviews (created_at, id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_last_seen ON sessions (last_seen)")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL migrations applied");
    Ok(())
}
