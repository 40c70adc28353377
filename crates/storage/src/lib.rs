//! Storage layer for bear-tracks
//!
//! Append/update event store over sessions and pageviews. SQLite (default)
//! and PostgreSQL backends implement the same async traits; callers hold a
//! [`StorageBackend`] and dispatch through it.

mod backend;
pub mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use types::StorageStats;
