//! Publish/subscribe fan-out of freshly appended pageviews.

use std::sync::Arc;

use bear_tracks_core::constants::{
    DEFAULT_LIVE_CHANNEL_CAPACITY, ENV_LIVE_CAPACITY, LIVE_SNAPSHOT_SIZE,
};
use bear_tracks_core::env_config::env_parse_with_default;
use bear_tracks_core::{NewPageView, PageView, RecentPageViews};
use bear_tracks_storage::StorageBackend;
use bear_tracks_storage::traits::PageViewStore;
use tokio::sync::{Mutex, broadcast};
use tokio::sync::broadcast::error::RecvError;

use crate::error::ServiceError;

/// Broadcasts every stored pageview to connected subscribers, in append order.
///
/// Each subscriber gets its own bounded cursor into a shared ring. A slow
/// subscriber that falls behind skips what was overwritten and carries on.
pub struct LiveFeed {
    storage: Arc<StorageBackend>,
    tx: broadcast::Sender<PageView>,
    /// Held across store append and send so ids go out in append order.
    append_lock: Mutex<()>,
    snapshot_size: usize,
}

impl LiveFeed {
    /// Ring capacity comes from `BEAR_TRACKS_LIVE_CAPACITY`.
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        let capacity = env_parse_with_default(ENV_LIVE_CAPACITY, DEFAULT_LIVE_CHANNEL_CAPACITY);
        Self::with_capacity(storage, capacity)
    }

    #[must_use]
    pub fn with_capacity(storage: Arc<StorageBackend>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { storage, tx, append_lock: Mutex::new(()), snapshot_size: LIVE_SNAPSHOT_SIZE }
    }

    /// Append a pageview to the store and offer it to all current
    /// subscribers. Returns the stored row and how many subscribers got it.
    ///
    /// Appends are serialized so that concurrent ingestion cannot publish a
    /// later id ahead of an earlier one.
    pub async fn append_and_publish(
        &self,
        new_view: &NewPageView,
    ) -> Result<(PageView, usize), ServiceError> {
        let _guard = self.append_lock.lock().await;
        let view = self.storage.append_page_view(new_view).await?;
        let receivers = self.publish(&view);
        Ok((view, receivers))
    }

    fn publish(&self, view: &PageView) -> usize {
        // Err only means nobody is listening.
        self.tx.send(view.clone()).unwrap_or(0)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Start a subscription: the live cursor first, then the snapshot, so
    /// nothing appended in between is lost. Such rows may arrive twice.
    pub async fn subscribe(&self) -> Result<Subscription, ServiceError> {
        let rx = self.tx.subscribe();
        let mut snapshot = self.storage.recent_page_views(self.snapshot_size).await?;
        snapshot.reverse();
        Ok(Subscription::new(snapshot, rx, self.snapshot_size))
    }
}

/// One connected consumer of the live feed.
pub struct Subscription {
    snapshot: Vec<PageView>,
    rx: broadcast::Receiver<PageView>,
    recent: RecentPageViews,
}

impl Subscription {
    fn new(snapshot: Vec<PageView>, rx: broadcast::Receiver<PageView>, window: usize) -> Self {
        let recent = RecentPageViews::from_oldest_first(window, snapshot.iter().cloned());
        Self { snapshot, rx, recent }
    }

    /// Rows present at connect time, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> &[PageView] {
        &self.snapshot
    }

    pub fn take_snapshot(&mut self) -> Vec<PageView> {
        std::mem::take(&mut self.snapshot)
    }

    /// Next live pageview, or `None` once the feed is gone.
    pub async fn recv(&mut self) -> Option<PageView> {
        loop {
            match self.rx.recv().await {
                Ok(view) => {
                    self.recent.push(view.clone());
                    return Some(view);
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "live subscriber lagged, skipping missed pageviews");
                },
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Bounded most-recent view (snapshot plus everything received), newest first.
    #[must_use]
    pub const fn recent(&self) -> &RecentPageViews {
        &self.recent
    }
}
