//! User-agent based device classification.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

static MOBILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mobile").expect("static regex is valid"));

static TABLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tablet").expect("static regex is valid"));

/// Coarse device class derived from the user agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    /// Classify a user agent string. Mobile wins over tablet; anything else is desktop.
    ///
    /// Returns `None` when no user agent was supplied.
    #[must_use]
    pub fn classify(user_agent: Option<&str>) -> Option<Self> {
        let ua = user_agent?;
        if MOBILE_REGEX.is_match(ua) {
            Some(Self::Mobile)
        } else if TABLET_REGEX.is_match(ua) {
            Some(Self::Tablet)
        } else {
            Some(Self::Desktop)
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(CoreError::InvalidDeviceType(other.to_owned())),
        }
    }
}
