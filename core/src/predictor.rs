//! Exact-match "prediction" of violation and stop outcome.
//!
//! This is a lookup, not a model: keep the stops whose six match fields
//! equal the request exactly, take the most frequent violation and outcome
//! among them, and fall back to the profile's fixed pair when nothing
//! matches. The fallback is not flagged to the user.
//!
//! Mode tie-break: among equally frequent values the lexicographically
//! lowest one wins.

use crate::{
    config::{PredictorProfile, FORM_MAX_AGE, FORM_MIN_AGE},
    error::{CheckError, CheckResult},
    stop::TrafficStop,
};
use chrono::{NaiveDate, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The prediction form. Country, race, date, time and search type only
/// feed the summary sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub stop_date: NaiveDate,
    pub stop_time: NaiveTime,
    pub country_name: String,
    pub driver_gender: String,
    pub driver_age: i64,
    pub driver_race: String,
    pub search_conducted: bool,
    pub search_type: String,
    pub drugs_related_stop: bool,
    pub stop_duration: String,
    pub vehicle_number: String,
}

impl PredictionRequest {
    /// All six match fields equal, case-sensitive. A null stored value
    /// never matches.
    pub fn matches(&self, stop: &TrafficStop) -> bool {
        stop.driver_gender.as_deref() == Some(self.driver_gender.as_str())
            && stop.driver_age == Some(self.driver_age)
            && stop.search_conducted == Some(self.search_conducted)
            && stop.stop_duration.as_deref() == Some(self.stop_duration.as_str())
            && stop.drugs_related_stop == Some(self.drugs_related_stop)
            && stop.vehicle_number.as_deref() == Some(self.vehicle_number.as_str())
    }

    /// Form-level checks. `duration_options` are the distinct stored
    /// durations; an empty list skips that check.
    pub fn validate(
        &self,
        profile: PredictorProfile,
        duration_options: &[String],
    ) -> CheckResult<()> {
        if !(FORM_MIN_AGE..=FORM_MAX_AGE).contains(&self.driver_age) {
            return Err(CheckError::InvalidRequest {
                field: "driver_age",
                reason: format!(
                    "{} is outside {FORM_MIN_AGE}..={FORM_MAX_AGE}",
                    self.driver_age
                ),
            });
        }
        if !profile.gender_options().contains(&self.driver_gender.as_str()) {
            return Err(CheckError::InvalidRequest {
                field: "driver_gender",
                reason: format!(
                    "'{}' is not one of {:?} ({} profile)",
                    self.driver_gender,
                    profile.gender_options(),
                    profile.as_str()
                ),
            });
        }
        if !duration_options.is_empty() && !duration_options.contains(&self.stop_duration) {
            return Err(CheckError::InvalidRequest {
                field: "stop_duration",
                reason: format!("'{}' is not a recorded stop duration", self.stop_duration),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub violation: String,
    pub outcome: String,
    /// Stops that matched the request. 0 means the fallback pair was used.
    pub matched_rows: usize,
}

pub struct ExactMatchPredictor {
    profile: PredictorProfile,
}

impl ExactMatchPredictor {
    pub fn new(profile: PredictorProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> PredictorProfile {
        self.profile
    }

    pub fn predict(&self, stops: &[TrafficStop], request: &PredictionRequest) -> Prediction {
        let matches: Vec<&TrafficStop> = stops.iter().filter(|s| request.matches(s)).collect();
        debug!(
            "prediction lookup: {} of {} stops matched",
            matches.len(),
            stops.len()
        );

        // A match set whose column is entirely null falls back per field.
        let violation = mode(matches.iter().map(|s| s.violation.as_deref()))
            .unwrap_or_else(|| self.profile.fallback_violation().to_string());
        let outcome = mode(matches.iter().map(|s| s.stop_outcome.as_deref()))
            .unwrap_or_else(|| self.profile.fallback_outcome().to_string());

        Prediction {
            violation,
            outcome,
            matched_rows: matches.len(),
        }
    }
}

/// Most frequent non-null value; ties go to the lowest value.
pub fn mode<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values.flatten() {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    // BTreeMap iterates in ascending order, so a strict `>` keeps the
    // lowest value among equal counts.
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// The human-readable paragraph shown under the prediction.
///
/// Wording follows the form's profile: the ledger form spells out its
/// gender codes and zero-pads the hour, the natural-language form does not.
pub fn summary(
    profile: PredictorProfile,
    request: &PredictionRequest,
    prediction: &Prediction,
) -> String {
    let (gender_note, time_format) = match profile {
        PredictorProfile::Ledger => (" (M - Male / F - Female)", "%I:%M %p"),
        PredictorProfile::NaturalLanguage => ("", "%-I:%M %p"),
    };
    let search_text = match (profile, request.search_conducted) {
        (_, true) => "A search was conducted",
        (PredictorProfile::Ledger, false) => "no search was conducted",
        (PredictorProfile::NaturalLanguage, false) => "No search was conducted",
    };
    let drug_text = if request.drugs_related_stop {
        "was drug-related"
    } else {
        "was not drug-related"
    };
    let search_type = if request.search_type.trim().is_empty() {
        "none recorded"
    } else {
        request.search_type.as_str()
    };

    format!(
        "Predicted Violation: {violation}\n\
         Predicted Stop Outcome: {outcome}\n\
         \n\
         A {age}-year-old {gender}{gender_note} driver ({race}) from {country} was stopped \
         for {violation} at {time} on {date}.\n\
         {search_text}, and the stop {drug_text}.\n\
         \n\
         Search type: {search_type}\n\
         Stop duration: {duration}\n\
         Vehicle number: {vehicle}",
        violation = prediction.violation,
        outcome = prediction.outcome,
        age = request.driver_age,
        gender = request.driver_gender,
        race = request.driver_race,
        country = request.country_name,
        time = request.stop_time.format(time_format),
        date = request.stop_date.format("%B %d, %Y"),
        duration = request.stop_duration,
        vehicle = request.vehicle_number,
    )
}
