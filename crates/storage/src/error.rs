//! Typed error enum for the storage layer.
//!
//! Both backends map their driver errors into [`StorageError`] so callers can
//! match on failure modes (not found, transient pool/IO trouble, corrupt rows)
//! without knowing which database is behind the trait.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Connection pool exhausted, lock contention or I/O failure.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] BoxError),

    /// Any other SQL failure.
    #[error("database error: {0}")]
    Database(#[source] BoxError),

    /// Row data could not be decoded into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn corrupt(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataCorruption { context: context.into(), source: Box::new(source) }
    }
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound`
/// - pool timeouts/closure and I/O → `Unavailable`
/// - decode failures → `DataCorruption`
/// - everything else → `Database`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(Box::new(err))
            },
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::corrupt("PostgreSQL row decode", err)
            },
            other => Self::Database(Box::new(other)),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        let transient = matches!(
            &err,
            rusqlite::Error::SqliteFailure(code, _)
                if matches!(
                    code.code,
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::SystemIoFailure
                )
        );
        if transient {
            return Self::Unavailable(Box::new(err));
        }

        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..) => Self::corrupt("SQLite row decode", err),
            other => Self::Database(Box::new(other)),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Unavailable(Box::new(err))
    }
}
