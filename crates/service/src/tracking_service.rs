use std::sync::Arc;

use bear_tracks_core::{DeviceType, IngestOutcome, NewPageView, TrackEvent};
use bear_tracks_storage::StorageBackend;
use bear_tracks_storage::traits::SessionStore;
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::live_feed::LiveFeed;

/// Turns raw beacon events into session and pageview rows.
///
/// Every call does exactly one session write (create or touch) and one
/// pageview append through the live feed, which publishes the stored row. There
/// are no retries; a store failure surfaces to the caller.
pub struct TrackingService {
    storage: Arc<StorageBackend>,
    live_feed: Arc<LiveFeed>,
}

impl TrackingService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, live_feed: Arc<LiveFeed>) -> Self {
        Self { storage, live_feed }
    }

    /// Ingest with the server clock. Microsecond precision, matching what the
    /// stores persist.
    pub async fn ingest(&self, event: TrackEvent) -> Result<IngestOutcome, ServiceError> {
        self.ingest_at(event, Utc::now().trunc_subsecs(6)).await
    }

    pub async fn ingest_at(
        &self,
        event: TrackEvent,
        now: DateTime<Utc>,
    ) -> Result<IngestOutcome, ServiceError> {
        if event.page_url.trim().is_empty() {
            return Err(ServiceError::InvalidInput("page_url is required".to_owned()));
        }

        let (session_token, session_created) = match event.normalized_token() {
            Some(token) => {
                let token = token.to_owned();
                if !self.storage.touch_session(&token, now).await? {
                    tracing::debug!(session_id = %token, "pageview for unknown session, recording anyway");
                }
                (token, false)
            },
            None => {
                let id = Uuid::new_v4().to_string();
                let created = self.storage.create_session(&id, now).await?;
                if !created {
                    tracing::warn!(session_id = %id, "freshly minted session id already existed");
                }
                (id, created)
            },
        };

        let device_type = DeviceType::classify(event.user_agent.as_deref());
        let new_view = NewPageView {
            session_id: session_token.clone(),
            page_url: event.page_url,
            referrer: non_blank(event.referrer),
            user_agent: event.user_agent,
            country: non_blank(event.country),
            device_type,
            created_at: now,
        };
        let (page_view, receivers) = self.live_feed.append_and_publish(&new_view).await?;
        tracing::debug!(
            session_id = %session_token,
            page_view_id = page_view.id,
            session_created,
            receivers,
            "pageview ingested"
        );

        Ok(IngestOutcome { session_token, page_view, session_created })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
