use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{SUNDAY_FIRST, first_max, weekday_name};

/// One hour of the heatmap: counts per weekday, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub hour: u32,
    pub label: String,
    pub days: [u64; 7],
}

/// Pageview counts by local hour (rows, 0-23) and weekday (columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyHeatmap {
    pub rows: Vec<HeatmapRow>,
    /// Largest single cell, for color scaling.
    pub max_count: u64,
}

impl HourlyHeatmap {
    fn from_cells(cells: [[u64; 7]; 24]) -> Self {
        let max_count = cells.iter().flatten().copied().max().unwrap_or(0);
        let rows = (0u32..)
            .zip(cells)
            .map(|(hour, days)| HeatmapRow { hour, label: format_hour(hour), days })
            .collect();
        Self { rows, max_count }
    }

    #[must_use]
    pub fn hour_totals(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.days.iter().sum()).collect()
    }

    /// Totals per weekday, Sunday first.
    #[must_use]
    pub fn day_totals(&self) -> [u64; 7] {
        let mut totals = [0u64; 7];
        for row in &self.rows {
            for (total, count) in totals.iter_mut().zip(row.days) {
                *total += count;
            }
        }
        totals
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.day_totals().iter().sum()
    }

    #[must_use]
    pub fn peaks(&self) -> Peaks {
        let peak_hour = first_max(&self.hour_totals()).and_then(|h| u32::try_from(h).ok());
        let peak_day = first_max(&self.day_totals()).map(|d| weekday_name(SUNDAY_FIRST[d]).to_owned());
        Peaks { peak_hour, peak_hour_label: peak_hour.map(format_hour), peak_day }
    }
}

/// Busiest hour and weekday. `None` means no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peaks {
    pub peak_hour: Option<u32>,
    pub peak_hour_label: Option<String>,
    pub peak_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSummary {
    #[serde(flatten)]
    pub peaks: Peaks,
    pub average_visits_per_hour: u64,
    pub average_visits_per_day: u64,
}

/// `0` -> `"12 AM"`, `13` -> `"1 PM"`.
#[must_use]
pub fn format_hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

pub fn hourly_heatmap<Tz: TimeZone>(
    timestamps: impl IntoIterator<Item = DateTime<Utc>>,
    tz: &Tz,
) -> HourlyHeatmap {
    let mut cells = [[0u64; 7]; 24];
    for ts in timestamps {
        let local = ts.with_timezone(tz);
        cells[local.hour() as usize][local.weekday().num_days_from_sunday() as usize] += 1;
    }
    HourlyHeatmap::from_cells(cells)
}

/// Peaks plus average traffic per active hour and per active weekday.
///
/// Averages divide by the number of distinct hours (days) that saw any
/// traffic, never by less than one.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "counts are non-negative and far below 2^52"
)]
pub fn timing_summary(heatmap: &HourlyHeatmap) -> TimingSummary {
    let hours = heatmap.hour_totals();
    let days = heatmap.day_totals();
    let total = heatmap.total();

    let average = |keys: usize| -> u64 {
        let denominator = keys.max(1) as f64;
        (total as f64 / denominator).round() as u64
    };

    TimingSummary {
        peaks: heatmap.peaks(),
        average_visits_per_hour: average(hours.iter().filter(|c| **c > 0).count()),
        average_visits_per_day: average(days.iter().filter(|c| **c > 0).count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::at;

    #[test]
    fn heatmap_always_has_every_cell() {
        let heatmap = hourly_heatmap(Vec::new(), &Utc);
        assert_eq!(heatmap.rows.len(), 24);
        assert!(heatmap.rows.iter().all(|r| r.days == [0; 7]));
        assert_eq!(heatmap.max_count, 0);
    }

    #[test]
    fn cells_use_hour_and_weekday() {
        // 2024-06-17 is a Monday.
        let heatmap = hourly_heatmap(vec![at(2024, 6, 17, 14, 5), at(2024, 6, 17, 14, 50)], &Utc);
        assert_eq!(heatmap.rows[14].days[1], 2);
        assert_eq!(heatmap.rows[14].label, "2 PM");
        assert_eq!(heatmap.max_count, 2);
        assert_eq!(heatmap.total(), 2);
    }

    #[test]
    fn peaks_without_data_are_none() {
        let peaks = hourly_heatmap(Vec::new(), &Utc).peaks();
        assert_eq!(peaks, Peaks { peak_hour: None, peak_hour_label: None, peak_day: None });
    }

    #[test]
    fn peak_ties_go_to_smallest_key() {
        // Monday 09:00 and Saturday 03:00, one each.
        let heatmap = hourly_heatmap(vec![at(2024, 6, 17, 9, 0), at(2024, 6, 22, 3, 0)], &Utc);
        let peaks = heatmap.peaks();
        assert_eq!(peaks.peak_hour, Some(3));
        assert_eq!(peaks.peak_hour_label.as_deref(), Some("3 AM"));
        assert_eq!(peaks.peak_day.as_deref(), Some("Monday"));
    }

    #[test]
    fn timing_summary_averages_over_active_keys() {
        // Sunday 10:00 x3, Sunday 11:00 x1.
        let rows = vec![
            at(2024, 6, 16, 10, 0),
            at(2024, 6, 16, 10, 10),
            at(2024, 6, 16, 10, 20),
            at(2024, 6, 16, 11, 0),
        ];
        let summary = timing_summary(&hourly_heatmap(rows, &Utc));
        assert_eq!(summary.peaks.peak_hour, Some(10));
        assert_eq!(summary.peaks.peak_day.as_deref(), Some("Sunday"));
        assert_eq!(summary.average_visits_per_hour, 2);
        assert_eq!(summary.average_visits_per_day, 4);
    }

    #[test]
    fn timing_summary_without_data_is_zero() {
        let summary = timing_summary(&hourly_heatmap(Vec::new(), &Utc));
        assert_eq!(summary.average_visits_per_hour, 0);
        assert_eq!(summary.average_visits_per_day, 0);
    }

    #[test]
    fn hour_labels() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(11), "11 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(23), "11 PM");
    }
}
