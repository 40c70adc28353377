//! Pure dashboard metric transforms.
//!
//! Every function here is a deterministic, read-only transform over rows
//! already loaded from the store. Calendar and time-of-day bucketing take the
//! time zone as an argument so callers decide what "today" means.

mod flow;
mod geography;
mod histogram;
mod realtime;
mod summary;
mod timing;
mod trend;

pub use flow::{PageFlow, page_flow};
pub use geography::{CountryVisits, UNKNOWN_COUNTRY, country_breakdown};
pub use histogram::{DurationBucket, DurationBucketCount, session_duration_histogram};
pub use realtime::{ActivePage, RealtimeSummary, active_pages};
pub use summary::{
    BounceRate, Overview, SessionSummary, bounce_rate, format_average_duration,
    format_percentage, mean_duration_minutes, pages_per_session, session_summary,
};
pub use timing::{
    HeatmapRow, HourlyHeatmap, Peaks, TimingSummary, format_hour, hourly_heatmap,
    timing_summary,
};
pub use trend::{DailyVisits, WeekdayVisits, daily_visits, weekday_name, weekday_totals};

use chrono::Weekday;

/// Weekdays in dashboard order.
pub const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Index of the largest non-zero count. Ties go to the smallest index.
pub(crate) fn first_max(counts: &[u64]) -> Option<usize> {
    let mut best = None;
    let mut best_count = 0;
    for (idx, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = Some(idx);
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::device::DeviceType;
    use crate::page_view::PageView;
    use crate::session::Session;

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    pub fn session(id: &str, first_seen: DateTime<Utc>, minutes: i64) -> Session {
        let mut s = Session::new(id, first_seen);
        s.last_seen = first_seen + Duration::minutes(minutes);
        s
    }

    pub fn view(id: i64, session_id: &str, url: &str, created_at: DateTime<Utc>) -> PageView {
        PageView {
            id,
            session_id: session_id.to_owned(),
            page_url: url.to_owned(),
            referrer: None,
            user_agent: None,
            country: None,
            device_type: Some(DeviceType::Desktop),
            created_at,
        }
    }
}
