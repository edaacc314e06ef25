//! Deterministic synthetic traffic-stop data.
//!
//! Stands in for the external ingest process on demo databases and in
//! tests. Same seed and count give the same rows, in the same order.

use crate::{
    config::PredictorProfile,
    rng::{RngBank, StreamRng, StreamSlot},
    stop::TrafficStop,
};
use chrono::{Duration, NaiveDate};

const COUNTRIES: &[&str] = &["Canada", "USA", "India"];
const RACES: &[&str] = &["White", "Black", "Hispanic", "Asian", "Other"];
const DURATIONS: &[(&str, f64)] = &[("0-15 Min", 0.6), ("16-30 Min", 0.3), ("30+ Min", 0.1)];
const VIOLATIONS: &[(&str, f64)] = &[
    ("Speeding", 0.45),
    ("Seatbelt", 0.15),
    ("Signal", 0.15),
    ("DUI", 0.10),
    ("Other", 0.15),
];
const SEARCH_TYPES: &[&str] = &["Vehicle Search", "Frisk", "Inventory"];
const FIRST_STOP_DAY: (i32, u32, u32) = (2020, 1, 1);
const SPAN_DAYS: i64 = 3 * 365;
/// Distinct plates drawn from, small enough that repeats occur.
const PLATE_POOL: u64 = 400;

pub struct StopGenerator {
    bank: RngBank,
    profile: PredictorProfile,
}

impl StopGenerator {
    pub fn new(seed: u64, profile: PredictorProfile) -> Self {
        Self {
            bank: RngBank::new(seed),
            profile,
        }
    }

    pub fn generate(&self, count: usize) -> Vec<TrafficStop> {
        let mut timing = self.bank.for_stream(StreamSlot::Timing);
        let mut driver = self.bank.for_stream(StreamSlot::Driver);
        let mut vehicle = self.bank.for_stream(StreamSlot::Vehicle);
        let mut enforcement = self.bank.for_stream(StreamSlot::Enforcement);

        let (y, m, d) = FIRST_STOP_DAY;
        let first_day = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);

        (0..count)
            .map(|_| {
                let date = first_day + Duration::days(timing.between(0, SPAN_DAYS - 1));
                let time = format!(
                    "{:02}:{:02}:00",
                    timing.between(0, 23),
                    timing.between(0, 59)
                );

                let age = if driver.chance(0.02) {
                    None
                } else {
                    Some(driver.between(16, 80))
                };

                let violation = *enforcement.pick_weighted(VIOLATIONS);
                let searched = enforcement.chance(if violation == "DUI" { 0.35 } else { 0.08 });
                let drugs = enforcement.chance(if searched { 0.40 } else { 0.02 });
                let outcome = outcome_for(&mut enforcement, violation, drugs);

                TrafficStop {
                    stop_date: Some(date.format("%Y-%m-%d").to_string()),
                    stop_time: Some(time),
                    country_name: Some((*driver.pick(COUNTRIES)).to_string()),
                    driver_gender: Some((*driver.pick(self.profile.gender_options())).to_string()),
                    driver_age: age,
                    driver_race: Some((*driver.pick(RACES)).to_string()),
                    search_conducted: Some(searched),
                    search_type: searched.then(|| (*enforcement.pick(SEARCH_TYPES)).to_string()),
                    drugs_related_stop: Some(drugs),
                    stop_duration: Some((*enforcement.pick_weighted(DURATIONS)).to_string()),
                    vehicle_number: Some(plate(&mut vehicle)),
                    violation: Some(violation.to_string()),
                    stop_outcome: Some(outcome.to_string()),
                    is_arrested: Some(outcome == "Arrest"),
                }
            })
            .collect()
    }
}

fn outcome_for(rng: &mut StreamRng, violation: &str, drugs: bool) -> &'static str {
    let arrest_p = match (violation, drugs) {
        (_, true) => 0.45,
        ("DUI", false) => 0.30,
        _ => 0.04,
    };
    if rng.chance(arrest_p) {
        "Arrest"
    } else if rng.chance(0.5) {
        "Citation"
    } else {
        "Warning"
    }
}

/// Plates look like `AB12CD3456`.
fn plate(rng: &mut StreamRng) -> String {
    let id = rng.next_u64_below(PLATE_POOL);
    let letters = |n: u64| -> char { (b'A' + (n % 26) as u8) as char };
    format!(
        "{}{}{:02}{}{}{:04}",
        letters(id),
        letters(id / 26),
        id % 100,
        letters(id / 7),
        letters(id / 13),
        (id * 37) % 10_000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rows() {
        let a = StopGenerator::new(12345, PredictorProfile::Ledger).generate(50);
        let b = StopGenerator::new(12345, PredictorProfile::Ledger).generate(50);
        assert_eq!(a, b);
        let c = StopGenerator::new(54321, PredictorProfile::Ledger).generate(50);
        assert_ne!(a, c);
    }

    #[test]
    fn arrest_flag_follows_outcome() {
        for stop in StopGenerator::new(1, PredictorProfile::Ledger).generate(300) {
            assert_eq!(stop.is_arrested, Some(stop.stop_outcome.as_deref() == Some("Arrest")));
            if stop.search_conducted == Some(false) {
                assert_eq!(stop.search_type, None);
            }
        }
    }

    #[test]
    fn gender_follows_profile() {
        let stops = StopGenerator::new(9, PredictorProfile::NaturalLanguage).generate(100);
        assert!(stops.iter().all(|s| matches!(
            s.driver_gender.as_deref(),
            Some("male") | Some("female")
        )));
    }

    #[test]
    fn plates_are_ten_characters() {
        let mut rng = StreamRng::new(3, 2);
        for _ in 0..50 {
            assert_eq!(plate(&mut rng).len(), 10);
        }
    }
}
