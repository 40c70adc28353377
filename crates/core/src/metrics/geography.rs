use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round1;

/// Bucket for pageviews without a country hint.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryVisits {
    pub country: String,
    pub visits: u64,
    /// Share of all pageviews, one decimal.
    pub percentage: f64,
}

/// Merge per-country counts, most visits first, ties by country name.
///
/// Missing or blank countries fold into [`UNKNOWN_COUNTRY`].
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "row counts stay far below 2^52")]
pub fn country_breakdown(
    counts: impl IntoIterator<Item = (Option<String>, u64)>,
) -> Vec<CountryVisits> {
    let mut merged: BTreeMap<String, u64> = BTreeMap::new();
    for (country, visits) in counts {
        let key = country
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_owned());
        *merged.entry(key).or_default() += visits;
    }

    let total: u64 = merged.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut rows: Vec<CountryVisits> = merged
        .into_iter()
        .filter(|(_, visits)| *visits > 0)
        .map(|(country, visits)| CountryVisits {
            country,
            visits,
            percentage: round1(visits as f64 / total as f64 * 100.0),
        })
        .collect();
    rows.sort_by(|a, b| b.visits.cmp(&a.visits));
    rows
}
