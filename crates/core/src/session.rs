use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An anonymous visitor session.
///
/// `first_seen` is fixed at creation; `last_seen` only ever moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(id: impl Into<String>, first_seen: DateTime<Utc>) -> Self {
        Self { id: id.into(), first_seen, last_seen: first_seen }
    }

    /// Time between the first and the last event, never negative.
    #[must_use]
    pub fn duration(&self) -> Duration {
        (self.last_seen - self.first_seen).max(Duration::zero())
    }

    /// Duration in fractional minutes.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "session durations fit easily in f64")]
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 60_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_session_starts_and_ends_at_the_same_instant() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap();
        let session = Session::new("abc", t0);
        assert_eq!(session.first_seen, session.last_seen);
        assert_eq!(session.duration(), Duration::zero());
    }

    #[test]
    fn duration_minutes_is_fractional() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap();
        let mut session = Session::new("abc", t0);
        session.last_seen = t0 + Duration::seconds(90);
        assert!((session.duration_minutes() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_never_negative() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap();
        let mut session = Session::new("abc", t0);
        session.last_seen = t0 - Duration::minutes(5);
        assert_eq!(session.duration(), Duration::zero());
    }
}
