#![allow(dead_code)]

pub mod bucket;

use securecheck_core::{
    config::PredictorProfile, loader::StopLoader, stop::TrafficStop, synth::StopGenerator,
    table::Table,
};
use std::path::PathBuf;

// ── Temporary databases ──────────────────────────────────────────────────────

/// A SQLite file under the temp dir, deleted on drop.
pub struct TempDb {
    path: PathBuf,
}

impl TempDb {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "securecheck-{name}-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }

    pub fn with_stops(name: &str, stops: &[TrafficStop]) -> Self {
        let db = Self::new(name);
        let mut loader = StopLoader::open(db.path()).unwrap();
        loader.migrate().unwrap();
        loader.insert_stops(stops).unwrap();
        db
    }

    pub fn synthetic(name: &str, seed: u64, count: usize) -> Self {
        let stops = StopGenerator::new(seed, PredictorProfile::Ledger).generate(count);
        Self::with_stops(name, &stops)
    }

    pub fn path(&self) -> &str {
        self.path.to_str().unwrap()
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A path that cannot be opened.
pub const UNREACHABLE_DB: &str = "/nonexistent/securecheck/traffic.db";

// ── Fixture rows ─────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn stop(
    date: &str,
    time: &str,
    country: &str,
    gender: &str,
    age: Option<i64>,
    race: &str,
    searched: bool,
    drugs: bool,
    duration: &str,
    plate: &str,
    violation: &str,
    outcome: &str,
) -> TrafficStop {
    TrafficStop {
        stop_date: Some(date.into()),
        stop_time: Some(time.into()),
        country_name: Some(country.into()),
        driver_gender: Some(gender.into()),
        driver_age: age,
        driver_race: Some(race.into()),
        search_conducted: Some(searched),
        search_type: searched.then(|| "Vehicle Search".to_string()),
        drugs_related_stop: Some(drugs),
        stop_duration: Some(duration.into()),
        vehicle_number: Some(plate.into()),
        violation: Some(violation.into()),
        stop_outcome: Some(outcome.into()),
        is_arrested: Some(outcome == "Arrest"),
    }
}

/// Seven hand-checked stops. Expected aggregates are worked out in the
/// tests that use them.
pub fn fixture_stops() -> Vec<TrafficStop> {
    vec![
        stop("2020-03-01", "08:15:00", "USA", "M", Some(22), "White", false, true, "0-15 Min", "PLATE-A", "Speeding", "Citation"),
        stop("2020-07-04", "21:40:00", "USA", "F", Some(35), "Black", true, true, "16-30 Min", "PLATE-A", "DUI", "Arrest"),
        stop("2021-01-10", "13:05:00", "Canada", "M", Some(45), "Asian", true, false, "30+ Min", "PLATE-B", "DUI", "Arrest"),
        stop("2021-05-20", "18:30:00", "Canada", "F", Some(17), "White", false, false, "0-15 Min", "PLATE-C", "Speeding", "Warning"),
        stop("2021-11-11", "05:10:00", "India", "M", Some(65), "Hispanic", false, true, "16-30 Min", "PLATE-B", "Seatbelt", "Warning"),
        stop("2022-02-02", "20:00:00", "India", "F", None, "Other", true, false, "0-15 Min", "PLATE-D", "Speeding", "Citation"),
        stop("2022-06-30", "02:45:00", "USA", "M", Some(22), "White", false, true, "0-15 Min", "PLATE-A", "Speeding", "Warning"),
    ]
}

// ── Table helpers ────────────────────────────────────────────────────────────

pub fn text(table: &Table, row: usize, column: &str) -> String {
    table
        .cell(row, column)
        .and_then(|c| c.to_text())
        .unwrap_or_else(|| panic!("no text at row {row} column {column}"))
}

pub fn int(table: &Table, row: usize, column: &str) -> i64 {
    table
        .cell(row, column)
        .and_then(|c| c.as_i64())
        .unwrap_or_else(|| panic!("no integer at row {row} column {column}"))
}

pub fn real(table: &Table, row: usize, column: &str) -> f64 {
    table
        .cell(row, column)
        .and_then(|c| c.as_f64())
        .unwrap_or_else(|| panic!("no number at row {row} column {column}"))
}

/// Index of the first row whose `column` equals `value`.
pub fn find_row(table: &Table, column: &str, value: &str) -> usize {
    (0..table.row_count())
        .find(|&r| table.cell(r, column).and_then(|c| c.to_text()).as_deref() == Some(value))
        .unwrap_or_else(|| panic!("no row with {column} = {value}"))
}
