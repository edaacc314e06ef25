//! Series behind the three charts of the metrics page.
//! Styling belongs to whoever draws them.

use crate::{stop::TrafficStop, types::StopCount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub count: StopCount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub stops_by_violation: Vec<ChartPoint>,
    pub violations_by_country: Vec<ChartPoint>,
    pub gender_distribution: Vec<ChartPoint>,
}

impl ChartData {
    pub fn compute(stops: &[TrafficStop]) -> Self {
        Self {
            stops_by_violation: value_counts(stops.iter().map(|s| s.violation.as_deref())),
            violations_by_country: violations_by_country(stops),
            gender_distribution: value_counts(stops.iter().map(|s| s.driver_gender.as_deref())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops_by_violation.is_empty()
            && self.violations_by_country.is_empty()
            && self.gender_distribution.is_empty()
    }
}

/// Non-null values with their frequency, most frequent first.
/// Equal counts are ordered by label.
pub fn value_counts<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<ChartPoint> {
    let mut counts: HashMap<&str, StopCount> = HashMap::new();
    for v in values.flatten() {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut points: Vec<ChartPoint> = counts
        .into_iter()
        .map(|(label, count)| ChartPoint {
            label: label.to_string(),
            count,
        })
        .collect();
    points.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    points
}

/// Non-null violations per country, ordered by country name.
/// A country whose violations are all null still appears with 0.
fn violations_by_country(stops: &[TrafficStop]) -> Vec<ChartPoint> {
    let mut counts: BTreeMap<&str, StopCount> = BTreeMap::new();
    for stop in stops {
        let Some(country) = stop.country_name.as_deref() else {
            continue;
        };
        let entry = counts.entry(country).or_insert(0);
        if stop.violation.is_some() {
            *entry += 1;
        }
    }

    counts
        .into_iter()
        .map(|(label, count)| ChartPoint {
            label: label.to_string(),
            count,
        })
        .collect()
}
