//! Headline counts for the metrics page.

use crate::{stop::TrafficStop, types::StopCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopMetrics {
    pub total_stops: StopCount,
    pub arrests: StopCount,
    pub warnings: StopCount,
    pub drug_related: StopCount,
}

impl StopMetrics {
    /// Four independent scans of the same snapshot.
    pub fn compute(stops: &[TrafficStop]) -> Self {
        Self {
            total_stops: stops.len() as StopCount,
            arrests: count_outcomes_containing(stops, "arrest"),
            warnings: count_outcomes_containing(stops, "warning"),
            drug_related: stops
                .iter()
                .filter(|s| s.drugs_related_stop == Some(true))
                .count() as StopCount,
        }
    }
}

/// Case-insensitive substring match on `stop_outcome`; nulls never match.
fn count_outcomes_containing(stops: &[TrafficStop], needle: &str) -> StopCount {
    stops
        .iter()
        .filter(|s| {
            s.stop_outcome
                .as_deref()
                .is_some_and(|o| o.to_lowercase().contains(needle))
        })
        .count() as StopCount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(gender: &str, outcome: Option<&str>, drugs: Option<bool>) -> TrafficStop {
        TrafficStop {
            driver_gender: Some(gender.into()),
            stop_outcome: outcome.map(String::from),
            drugs_related_stop: drugs,
            ..Default::default()
        }
    }

    #[test]
    fn arrest_and_warning_are_substring_matches() {
        let stops = vec![
            stop("M", Some("Arrest Warrant"), None),
            stop("F", Some("Warning - Verbal"), None),
        ];
        let m = StopMetrics::compute(&stops);
        assert_eq!(m.total_stops, 2);
        assert_eq!(m.arrests, 1);
        assert_eq!(m.warnings, 1);
        assert_eq!(m.drug_related, 0);
    }

    #[test]
    fn empty_snapshot_is_all_zeros() {
        assert_eq!(StopMetrics::compute(&[]), StopMetrics::default());
    }

    #[test]
    fn null_outcomes_and_flags_are_skipped() {
        let stops = vec![
            stop("M", None, None),
            stop("F", Some("ARRESTED"), Some(true)),
            stop("F", Some("Citation"), Some(false)),
        ];
        let m = StopMetrics::compute(&stops);
        assert_eq!(m.total_stops, 3);
        assert_eq!(m.arrests, 1);
        assert_eq!(m.warnings, 0);
        assert_eq!(m.drug_related, 1);
        assert!(m.arrests <= m.total_stops && m.warnings <= m.total_stops);
    }
}
