use std::collections::HashMap;

use bear_tracks_core::{DeviceType, NewPageView, PageView};
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};

use super::{Storage, count_to_u64, decode_ts, encode_ts, get_conn};
use crate::error::StorageError;

const PAGE_VIEW_COLUMNS: &str =
    "id, session_id, page_url, referrer, user_agent, country, device_type, created_at";

fn row_to_page_view(row: &Row<'_>) -> Result<PageView, StorageError> {
    let device: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;
    Ok(PageView {
        id: row.get(0)?,
        session_id: row.get(1)?,
        page_url: row.get(2)?,
        referrer: row.get(3)?,
        user_agent: row.get(4)?,
        country: row.get(5)?,
        device_type: device.as_deref().and_then(|d| match d.parse::<DeviceType>() {
            Ok(device) => Some(device),
            Err(e) => {
                tracing::warn!(error = %e, "corrupt device_type in DB, ignoring");
                None
            },
        }),
        created_at: decode_ts(&created_at)?,
    })
}

fn collect_page_views(mut rows: rusqlite::Rows<'_>) -> Result<Vec<PageView>, StorageError> {
    let mut views = Vec::new();
    while let Some(row) = rows.next()? {
        views.push(row_to_page_view(row)?);
    }
    Ok(views)
}

impl Storage {
    /// Append a pageview.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn append_page_view(&self, view: &NewPageView) -> Result<PageView, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO pageviews
               (session_id, page_url, referrer, user_agent, country, device_type, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                view.session_id,
                view.page_url,
                view.referrer,
                view.user_agent,
                view.country,
                view.device_type.map(|d| d.as_str()),
                encode_ts(&view.created_at),
            ],
        )?;
        let id = conn.last_insert_rowid();
        let mut stored = view.clone().into_page_view(id);
        stored.created_at = decode_ts(&encode_ts(&view.created_at))?;
        Ok(stored)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn count_page_views(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pageviews", [], |r| r.get(0))?;
        Ok(count_to_u64(count))
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn count_page_views_since(&self, since: DateTime<Utc>) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pageviews WHERE created_at > ?1",
            params![encode_ts(&since)],
            |r| r.get(0),
        )?;
        Ok(count_to_u64(count))
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn list_page_views(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, StorageError> {
        let conn = get_conn(&self.pool)?;
        match since {
            Some(since) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews
                       WHERE created_at > ?1 ORDER BY created_at, id"
                ))?;
                collect_page_views(stmt.query(params![encode_ts(&since)])?)
            },
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews ORDER BY created_at, id"
                ))?;
                collect_page_views(stmt.query([])?)
            },
        }
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;
        collect_page_views(stmt.query(params![limit as i64])?)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn session_page_views(&self, session_id: &str) -> Result<Vec<PageView>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM pageviews WHERE session_id = ?1 ORDER BY created_at, id"
        ))?;
        collect_page_views(stmt.query(params![session_id])?)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn page_view_counts_by_session(&self) -> Result<HashMap<String, u64>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare("SELECT session_id, COUNT(*) FROM pageviews GROUP BY session_id")?;
        let mut rows = stmt.query([])?;
        let mut counts = HashMap::new();
        while let Some(row) = rows.next()? {
            counts.insert(row.get::<_, String>(0)?, count_to_u64(row.get(1)?));
        }
        Ok(counts)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn page_view_counts_by_country(&self) -> Result<Vec<(Option<String>, u64)>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT country, COUNT(*) FROM pageviews GROUP BY country")?;
        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            counts.push((row.get::<_, Option<String>>(0)?, count_to_u64(row.get(1)?)));
        }
        Ok(counts)
    }
}
