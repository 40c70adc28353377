use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::SUNDAY_FIRST;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVisits {
    pub date: NaiveDate,
    pub visits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayVisits {
    pub day: String,
    pub visits: u64,
}

#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Pageviews per local calendar day for today and the `days` days before it.
///
/// Always returns `days + 1` entries, oldest first, zero-filled. Timestamps
/// outside the window are ignored.
pub fn daily_visits<Tz: TimeZone>(
    timestamps: impl IntoIterator<Item = DateTime<Utc>>,
    days: u32,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<DailyVisits> {
    let today = now.with_timezone(tz).date_naive();
    let start = today.checked_sub_days(Days::new(u64::from(days))).unwrap_or(NaiveDate::MIN);

    let mut buckets: BTreeMap<NaiveDate, u64> =
        start.iter_days().take_while(|d| *d <= today).map(|d| (d, 0)).collect();

    for ts in timestamps {
        let day = ts.with_timezone(tz).date_naive();
        if let Some(count) = buckets.get_mut(&day) {
            *count += 1;
        }
    }

    buckets.into_iter().map(|(date, visits)| DailyVisits { date, visits }).collect()
}

/// Pageviews per local weekday, Sunday first, all seven present.
pub fn weekday_totals<Tz: TimeZone>(
    timestamps: impl IntoIterator<Item = DateTime<Utc>>,
    tz: &Tz,
) -> Vec<WeekdayVisits> {
    let mut counts = [0u64; 7];
    for ts in timestamps {
        counts[ts.with_timezone(tz).weekday().num_days_from_sunday() as usize] += 1;
    }
    SUNDAY_FIRST
        .iter()
        .zip(counts)
        .map(|(day, visits)| WeekdayVisits { day: weekday_name(*day).to_owned(), visits })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::metrics::test_support::at;

    #[test]
    fn empty_store_yields_zero_filled_window() {
        let now = at(2024, 6, 15, 12, 0);
        let trend = daily_visits(Vec::new(), 7, now, &Utc);
        assert_eq!(trend.len(), 8);
        assert!(trend.iter().all(|d| d.visits == 0));
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 6, 8).unwrap());
        assert_eq!(trend[7].date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn counts_land_on_their_day_and_outliers_are_dropped() {
        let now = at(2024, 6, 15, 12, 0);
        let rows = vec![
            at(2024, 6, 15, 1, 0),
            at(2024, 6, 15, 11, 59),
            at(2024, 6, 14, 23, 0),
            at(2024, 6, 1, 9, 0),
            at(2024, 6, 16, 9, 0),
        ];
        let trend = daily_visits(rows, 2, now, &Utc);
        let visits: Vec<u64> = trend.iter().map(|d| d.visits).collect();
        assert_eq!(visits, vec![0, 1, 2]);
    }

    #[test]
    fn zero_days_is_just_today() {
        let now = at(2024, 6, 15, 12, 0);
        let trend = daily_visits(vec![now], 0, now, &Utc);
        assert_eq!(trend, vec![DailyVisits { date: now.date_naive(), visits: 1 }]);
    }

    #[test]
    fn days_follow_the_supplied_zone() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        // 22:30 UTC on the 14th is already the 15th at UTC+3.
        let now = at(2024, 6, 14, 22, 30);
        let trend = daily_visits(vec![now], 1, now, &tz);
        assert_eq!(trend[1].date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(trend[1].visits, 1);
    }

    #[test]
    fn weekday_totals_are_sunday_first() {
        // 2024-06-16 is a Sunday, 2024-06-17 a Monday.
        let rows = vec![at(2024, 6, 16, 10, 0), at(2024, 6, 17, 10, 0), at(2024, 6, 17, 11, 0)];
        let totals = weekday_totals(rows, &Utc);
        assert_eq!(totals.len(), 7);
        assert_eq!(totals[0], WeekdayVisits { day: "Sunday".to_owned(), visits: 1 });
        assert_eq!(totals[1], WeekdayVisits { day: "Monday".to_owned(), visits: 2 });
        assert_eq!(totals[6].visits, 0);
    }
}
