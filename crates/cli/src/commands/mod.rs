pub(crate) mod query;
pub(crate) mod serve;

use std::sync::Arc;

use anyhow::Result;
use bear_tracks_storage::StorageBackend;

use crate::{DbArgs, default_db_path};

pub(crate) async fn open_storage(db: &DbArgs) -> Result<Arc<StorageBackend>> {
    #[cfg(feature = "postgres")]
    if let Some(url) = db.database_url.as_deref() {
        let backend = StorageBackend::new_postgres(url).await?;
        tracing::info!("Using PostgreSQL backend");
        return Ok(Arc::new(backend));
    }
    #[cfg(not(feature = "postgres"))]
    if db.database_url.is_some() {
        tracing::warn!("database URL ignored: built without the postgres feature");
    }

    let path = db.db_path.clone().unwrap_or_else(default_db_path);
    let backend = StorageBackend::new_sqlite(&path)?;
    tracing::info!(path = %path.display(), "Using SQLite backend");
    Ok(Arc::new(backend))
}
