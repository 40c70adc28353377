use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Session length ranges, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    UnderOneMinute,
    OneToFive,
    FiveToFifteen,
    FifteenToThirty,
    ThirtyPlus,
}

impl DurationBucket {
    pub const ALL: [Self; 5] = [
        Self::UnderOneMinute,
        Self::OneToFive,
        Self::FiveToFifteen,
        Self::FifteenToThirty,
        Self::ThirtyPlus,
    ];

    #[must_use]
    pub const fn for_minutes(minutes: i64) -> Self {
        match minutes {
            i64::MIN..1 => Self::UnderOneMinute,
            1..5 => Self::OneToFive,
            5..15 => Self::FiveToFifteen,
            15..30 => Self::FifteenToThirty,
            _ => Self::ThirtyPlus,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match *self {
            Self::UnderOneMinute => "< 1m",
            Self::OneToFive => "1-5m",
            Self::FiveToFifteen => "5-15m",
            Self::FifteenToThirty => "15-30m",
            Self::ThirtyPlus => "30m+",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::UnderOneMinute => 0,
            Self::OneToFive => 1,
            Self::FiveToFifteen => 2,
            Self::FifteenToThirty => 3,
            Self::ThirtyPlus => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBucketCount {
    pub range: String,
    pub sessions: u64,
}

/// Histogram of session lengths. All five buckets are always present.
#[must_use]
pub fn session_duration_histogram(sessions: &[Session]) -> Vec<DurationBucketCount> {
    let mut counts = [0u64; 5];
    for session in sessions {
        counts[DurationBucket::for_minutes(session.duration().num_minutes()).index()] += 1;
    }
    DurationBucket::ALL
        .iter()
        .map(|bucket| DurationBucketCount {
            range: bucket.label().to_owned(),
            sessions: counts[bucket.index()],
        })
        .collect()
}
