mod common;

use common::{fixture_stops, TempDb, UNREACHABLE_DB};
use securecheck_core::{
    charts::ChartData, metrics::StopMetrics, stop::TrafficStop, store::StopStore,
};

#[test]
fn headline_counts_on_fixture() {
    let db = TempDb::with_stops("metrics-fixture", &fixture_stops());
    let metrics = StopMetrics::compute(&StopStore::new(db.path()).snapshot());

    assert_eq!(metrics.total_stops, 7);
    assert_eq!(metrics.arrests, 2);
    assert_eq!(metrics.warnings, 3);
    assert_eq!(metrics.drug_related, 4);
}

/// Outcome labels are matched by substring, ignoring case.
#[test]
fn outcome_matching_ignores_case() {
    let stops = vec![
        TrafficStop {
            driver_gender: Some("M".into()),
            stop_outcome: Some("Arrest Warrant".into()),
            ..Default::default()
        },
        TrafficStop {
            driver_gender: Some("F".into()),
            stop_outcome: Some("Warning - Verbal".into()),
            ..Default::default()
        },
    ];
    let db = TempDb::with_stops("metrics-scenario", &stops);
    let metrics = StopMetrics::compute(&StopStore::new(db.path()).snapshot());

    assert_eq!(metrics.total_stops, 2);
    assert_eq!(metrics.arrests, 1);
    assert_eq!(metrics.warnings, 1);
}

#[test]
fn counts_are_bounded_by_total() {
    for seed in [1_u64, 2, 3] {
        let db = TempDb::synthetic(&format!("metrics-bounds-{seed}"), seed, 400);
        let snapshot = StopStore::new(db.path()).snapshot();
        let metrics = StopMetrics::compute(&snapshot);

        assert_eq!(metrics.total_stops, snapshot.len() as i64);
        assert!(metrics.arrests <= metrics.total_stops);
        assert!(metrics.warnings <= metrics.total_stops);
        assert!(metrics.drug_related <= metrics.total_stops);
    }
}

#[test]
fn unreachable_store_gives_zero_metrics_and_no_charts() {
    let snapshot = StopStore::new(UNREACHABLE_DB).snapshot();
    assert_eq!(StopMetrics::compute(&snapshot), StopMetrics::default());
    assert!(ChartData::compute(&snapshot).is_empty());
}

#[test]
fn chart_series_sum_to_table_size() {
    let db = TempDb::with_stops("charts", &fixture_stops());
    let charts = ChartData::compute(&StopStore::new(db.path()).snapshot());

    let by_violation: i64 = charts.stops_by_violation.iter().map(|p| p.count).sum();
    let by_country: i64 = charts.violations_by_country.iter().map(|p| p.count).sum();
    let by_gender: i64 = charts.gender_distribution.iter().map(|p| p.count).sum();
    assert_eq!((by_violation, by_country, by_gender), (7, 7, 7));

    assert_eq!(charts.stops_by_violation[0].label, "Speeding");
    assert_eq!(charts.stops_by_violation[0].count, 4);
    let countries: Vec<&str> = charts
        .violations_by_country
        .iter()
        .map(|p| p.label.as_str())
        .collect();
    assert_eq!(countries, vec!["Canada", "India", "USA"]);
}
