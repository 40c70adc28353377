use serde::Serialize;

use crate::page_view::PageView;

/// One raw beacon call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackEvent {
    /// Token returned by an earlier call, if the client has one.
    pub session_token: Option<String>,
    pub page_url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
}

impl TrackEvent {
    #[must_use]
    pub fn new(page_url: impl Into<String>) -> Self {
        Self { page_url: page_url.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// The session token, treating empty or whitespace-only values as absent.
    #[must_use]
    pub fn normalized_token(&self) -> Option<&str> {
        self.session_token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Result of ingesting a [`TrackEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    /// Token the client must send with its next event.
    pub session_token: String,
    pub page_view: PageView,
    /// True when this call minted the session.
    pub session_created: bool,
}
