//! Wire types for the beacon and meta endpoints.

use serde::{Deserialize, Serialize};

/// Beacon payload. `pageUrl` is optional here so a missing value becomes a
/// 400 from the handler rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default, alias = "sessionToken")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub storage: &'static str,
}
