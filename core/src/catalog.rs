//! The insight catalog: a fixed menu of canned analytical queries.
//!
//! Each variant owns its label, its SQL and the column names that SQL
//! produces. Queries take no parameters; nothing user-supplied reaches
//! these strings.
//!
//! Rates are `ROUND(CAST(SUM(flag) AS REAL) / COUNT(*) * 100, 2)`. Groups
//! only exist when they hold at least one row, so the divisor is never 0.
//! Ties under ORDER BY ... LIMIT follow SQLite's own order; stable order is
//! not guaranteed.

use crate::{
    error::{CheckError, CheckResult},
    table::Table,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTier {
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightQuery {
    // ── Basic ─────────────────────────────────────
    DrugStopVehicles,
    MostSearchedVehicles,
    ArrestRateByAgeGroup,
    GenderByCountry,
    SearchRateByRaceAndGender,
    StopsByTimeOfDay,
    AverageDurationByViolation,
    NightStopArrests,
    ViolationSearchArrestRates,
    ViolationsUnder25,
    RarelySearchedViolations,
    DrugRateByCountry,
    ArrestRateByCountryAndViolation,
    SearchesByCountry,

    // ── Advanced ──────────────────────────────────
    YearlyCountryBreakdown,
    ViolationTrendsByAgeAndRace,
    StopsByYearMonthHour,
    RankedViolationRates,
    DemographicsByCountry,
    TopArrestRateViolations,
}

impl InsightQuery {
    /// Menu order: the 14 basic queries, then the 6 advanced ones.
    pub const ALL: [InsightQuery; 20] = [
        Self::DrugStopVehicles,
        Self::MostSearchedVehicles,
        Self::ArrestRateByAgeGroup,
        Self::GenderByCountry,
        Self::SearchRateByRaceAndGender,
        Self::StopsByTimeOfDay,
        Self::AverageDurationByViolation,
        Self::NightStopArrests,
        Self::ViolationSearchArrestRates,
        Self::ViolationsUnder25,
        Self::RarelySearchedViolations,
        Self::DrugRateByCountry,
        Self::ArrestRateByCountryAndViolation,
        Self::SearchesByCountry,
        Self::YearlyCountryBreakdown,
        Self::ViolationTrendsByAgeAndRace,
        Self::StopsByYearMonthHour,
        Self::RankedViolationRates,
        Self::DemographicsByCountry,
        Self::TopArrestRateViolations,
    ];

    pub fn tier(&self) -> InsightTier {
        match self {
            Self::YearlyCountryBreakdown
            | Self::ViolationTrendsByAgeAndRace
            | Self::StopsByYearMonthHour
            | Self::RankedViolationRates
            | Self::DemographicsByCountry
            | Self::TopArrestRateViolations => InsightTier::Advanced,
            _ => InsightTier::Basic,
        }
    }

    pub fn of_tier(tier: InsightTier) -> impl Iterator<Item = InsightQuery> {
        Self::ALL.into_iter().filter(move |q| q.tier() == tier)
    }

    /// Short stable identifier, used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::DrugStopVehicles => "drug-stop-vehicles",
            Self::MostSearchedVehicles => "most-searched-vehicles",
            Self::ArrestRateByAgeGroup => "arrest-rate-by-age-group",
            Self::GenderByCountry => "gender-by-country",
            Self::SearchRateByRaceAndGender => "search-rate-by-race-and-gender",
            Self::StopsByTimeOfDay => "stops-by-time-of-day",
            Self::AverageDurationByViolation => "average-duration-by-violation",
            Self::NightStopArrests => "night-stop-arrests",
            Self::ViolationSearchArrestRates => "violation-search-arrest-rates",
            Self::ViolationsUnder25 => "violations-under-25",
            Self::RarelySearchedViolations => "rarely-searched-violations",
            Self::DrugRateByCountry => "drug-rate-by-country",
            Self::ArrestRateByCountryAndViolation => "arrest-rate-by-country-and-violation",
            Self::SearchesByCountry => "searches-by-country",
            Self::YearlyCountryBreakdown => "yearly-country-breakdown",
            Self::ViolationTrendsByAgeAndRace => "violation-trends-by-age-and-race",
            Self::StopsByYearMonthHour => "stops-by-year-month-hour",
            Self::RankedViolationRates => "ranked-violation-rates",
            Self::DemographicsByCountry => "demographics-by-country",
            Self::TopArrestRateViolations => "top-arrest-rate-violations",
        }
    }

    /// Human-readable menu text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DrugStopVehicles => "Top 10 vehicle_numbers involved in drug-related stops",
            Self::MostSearchedVehicles => "Most frequently searched vehicle number",
            Self::ArrestRateByAgeGroup => "Driver age group with highest arrest rate",
            Self::GenderByCountry => "Gender distribution of drivers stopped in each country",
            Self::SearchRateByRaceAndGender => "Race and gender combination with highest search rate",
            Self::StopsByTimeOfDay => "Time of day with most traffic stops",
            Self::AverageDurationByViolation => "Average stop duration for different violations",
            Self::NightStopArrests => "Are night stops more likely to lead to arrests?",
            Self::ViolationSearchArrestRates => "Violations most associated with searches or arrests",
            Self::ViolationsUnder25 => "Violations most common among drivers under age 25",
            Self::RarelySearchedViolations => "Violation that rarely results in search or arrest",
            Self::DrugRateByCountry => "Countries with highest rate of drug-related stops",
            Self::ArrestRateByCountryAndViolation => "Arrest rate by country and violation",
            Self::SearchesByCountry => "Countries with most stops where search was conducted",
            Self::YearlyCountryBreakdown => "Yearly breakdown of stops and arrests by country",
            Self::ViolationTrendsByAgeAndRace => "Driver violation trends by age and race",
            Self::StopsByYearMonthHour => "Time period analysis of stops (Year, Month, Hour)",
            Self::RankedViolationRates => "Violations with high search and arrest rates",
            Self::DemographicsByCountry => "Driver demographics by country (age, gender, race)",
            Self::TopArrestRateViolations => "Top 5 violations with highest arrest rates",
        }
    }

    /// Look a query up by its label or its key.
    pub fn from_label(label: &str) -> CheckResult<InsightQuery> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.label() == wanted || q.key() == wanted)
            .ok_or_else(|| CheckError::UnknownQuery {
                label: wanted.to_string(),
            })
    }

    /// Column names, in order, of the rows this query produces.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::DrugStopVehicles => &["vehicle_number", "stop_count"],
            Self::MostSearchedVehicles => &["vehicle_number", "search_count"],
            Self::ArrestRateByAgeGroup => &["age_group", "total_stops", "total_arrests", "arrest_rate"],
            Self::GenderByCountry => &["country_name", "driver_gender", "stop_count"],
            Self::SearchRateByRaceAndGender => &[
                "driver_race",
                "driver_gender",
                "total_stops",
                "total_searches",
                "search_rate",
            ],
            Self::StopsByTimeOfDay => &["time_of_day", "total_stops"],
            Self::AverageDurationByViolation => &["violation", "avg_duration"],
            Self::NightStopArrests => &["time_period", "total_stops", "arrests", "arrest_rate"],
            Self::ViolationSearchArrestRates | Self::RarelySearchedViolations => {
                &["violation", "search_rate", "arrest_rate"]
            }
            Self::ViolationsUnder25 => &["violation", "count"],
            Self::DrugRateByCountry => &["country_name", "total_stops", "drug_stops", "drug_rate"],
            Self::ArrestRateByCountryAndViolation => {
                &["country_name", "violation", "total", "arrests", "arrest_rate"]
            }
            Self::SearchesByCountry => &["country_name", "searches"],
            Self::YearlyCountryBreakdown => &[
                "country_name",
                "stop_year",
                "total_stops",
                "total_arrests",
                "arrest_rate_percent",
                "cumulative_stops",
                "cumulative_arrests",
            ],
            Self::ViolationTrendsByAgeAndRace => {
                &["driver_race", "driver_age", "violation", "total_violations"]
            }
            Self::StopsByYearMonthHour => &["year", "month", "hour", "total_stops"],
            Self::RankedViolationRates => &[
                "violation",
                "search_rate",
                "arrest_rate",
                "search_rank",
                "arrest_rank",
            ],
            Self::DemographicsByCountry => {
                &["country_name", "driver_age", "driver_gender", "driver_race", "count"]
            }
            Self::TopArrestRateViolations => &["violation", "total", "arrests", "arrest_rate"],
        }
    }

    /// The SQL template, executed verbatim.
    pub fn sql(&self) -> &'static str {
        match self {
            Self::DrugStopVehicles => {
                "SELECT vehicle_number, COUNT(*) AS stop_count
                 FROM traffic_stops
                 WHERE drugs_related_stop = 1
                 GROUP BY vehicle_number
                 HAVING stop_count > 0
                 ORDER BY stop_count DESC
                 LIMIT 10"
            }
            Self::MostSearchedVehicles => {
                "SELECT vehicle_number, COUNT(*) AS search_count
                 FROM traffic_stops
                 WHERE search_conducted = 1
                 GROUP BY vehicle_number
                 ORDER BY search_count DESC
                 LIMIT 10"
            }
            Self::ArrestRateByAgeGroup => {
                "SELECT
                     CASE
                         WHEN driver_age < 18 THEN 'Under 18'
                         WHEN driver_age BETWEEN 18 AND 25 THEN '18-25'
                         WHEN driver_age BETWEEN 26 AND 40 THEN '26-40'
                         WHEN driver_age BETWEEN 41 AND 60 THEN '41-60'
                         ELSE '60+'
                     END AS age_group,
                     COUNT(*) AS total_stops,
                     SUM(is_arrested) AS total_arrests,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 WHERE driver_age IS NOT NULL
                 GROUP BY age_group
                 ORDER BY arrest_rate DESC"
            }
            Self::GenderByCountry => {
                "SELECT country_name, driver_gender, COUNT(*) AS stop_count
                 FROM traffic_stops
                 GROUP BY country_name, driver_gender
                 ORDER BY country_name"
            }
            Self::SearchRateByRaceAndGender => {
                "SELECT driver_race, driver_gender,
                     COUNT(*) AS total_stops,
                     SUM(search_conducted) AS total_searches,
                     ROUND(CAST(SUM(search_conducted) AS REAL) / COUNT(*) * 100, 2) AS search_rate
                 FROM traffic_stops
                 GROUP BY driver_race, driver_gender
                 ORDER BY search_rate DESC"
            }
            Self::StopsByTimeOfDay => {
                "SELECT
                     CASE
                         WHEN CAST(strftime('%H', stop_time) AS INTEGER) BETWEEN 5 AND 11 THEN 'Morning'
                         WHEN CAST(strftime('%H', stop_time) AS INTEGER) BETWEEN 12 AND 16 THEN 'Afternoon'
                         WHEN CAST(strftime('%H', stop_time) AS INTEGER) BETWEEN 17 AND 20 THEN 'Evening'
                         ELSE 'Night'
                     END AS time_of_day,
                     COUNT(*) AS total_stops
                 FROM traffic_stops
                 GROUP BY time_of_day
                 ORDER BY total_stops DESC"
            }
            Self::AverageDurationByViolation => {
                "SELECT violation, AVG(CAST(stop_duration AS INTEGER)) AS avg_duration
                 FROM traffic_stops
                 GROUP BY violation
                 ORDER BY avg_duration DESC"
            }
            Self::NightStopArrests => {
                "SELECT
                     CASE
                         WHEN CAST(strftime('%H', stop_time) AS INTEGER) >= 20
                           OR CAST(strftime('%H', stop_time) AS INTEGER) < 6 THEN 'Night'
                         ELSE 'Day'
                     END AS time_period,
                     COUNT(*) AS total_stops,
                     SUM(is_arrested) AS arrests,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 GROUP BY time_period"
            }
            Self::ViolationSearchArrestRates => {
                "SELECT violation,
                     ROUND(CAST(SUM(search_conducted) AS REAL) / COUNT(*) * 100, 2) AS search_rate,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 GROUP BY violation
                 ORDER BY search_rate DESC, arrest_rate DESC"
            }
            Self::ViolationsUnder25 => {
                "SELECT violation, COUNT(*) AS count
                 FROM traffic_stops
                 WHERE driver_age < 25
                 GROUP BY violation
                 ORDER BY count DESC"
            }
            Self::RarelySearchedViolations => {
                "SELECT violation,
                     ROUND(CAST(SUM(search_conducted) AS REAL) / COUNT(*) * 100, 2) AS search_rate,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 GROUP BY violation
                 ORDER BY search_rate ASC, arrest_rate ASC
                 LIMIT 5"
            }
            Self::DrugRateByCountry => {
                "SELECT country_name,
                     COUNT(*) AS total_stops,
                     SUM(drugs_related_stop) AS drug_stops,
                     ROUND(CAST(SUM(drugs_related_stop) AS REAL) / COUNT(*) * 100, 2) AS drug_rate
                 FROM traffic_stops
                 GROUP BY country_name
                 ORDER BY drug_rate DESC"
            }
            Self::ArrestRateByCountryAndViolation => {
                "SELECT country_name, violation,
                     COUNT(*) AS total,
                     SUM(is_arrested) AS arrests,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 GROUP BY country_name, violation
                 ORDER BY country_name ASC, arrest_rate DESC"
            }
            Self::SearchesByCountry => {
                "SELECT country_name, COUNT(*) AS searches
                 FROM traffic_stops
                 WHERE search_conducted = 1
                 GROUP BY country_name
                 ORDER BY searches DESC"
            }
            Self::YearlyCountryBreakdown => {
                "SELECT
                     country_name,
                     stop_year,
                     total_stops,
                     total_arrests,
                     ROUND(CAST(total_arrests AS REAL) / total_stops * 100, 2) AS arrest_rate_percent,
                     SUM(total_stops) OVER (PARTITION BY country_name ORDER BY stop_year) AS cumulative_stops,
                     SUM(total_arrests) OVER (PARTITION BY country_name ORDER BY stop_year) AS cumulative_arrests
                 FROM (
                     SELECT
                         country_name,
                         CAST(strftime('%Y', stop_date) AS INTEGER) AS stop_year,
                         COUNT(*) AS total_stops,
                         SUM(is_arrested) AS total_arrests
                     FROM traffic_stops
                     GROUP BY country_name, stop_year
                 ) AS yearly_stats
                 ORDER BY country_name, stop_year"
            }
            Self::ViolationTrendsByAgeAndRace => {
                "SELECT DISTINCT
                     t.driver_race AS driver_race,
                     t.driver_age AS driver_age,
                     t.violation AS violation,
                     v.total_violations AS total_violations
                 FROM traffic_stops t
                 JOIN (
                     SELECT driver_age, driver_race, violation, COUNT(*) AS total_violations
                     FROM traffic_stops
                     GROUP BY driver_age, driver_race, violation
                 ) v
                   ON t.driver_age = v.driver_age
                  AND t.driver_race = v.driver_race
                  AND t.violation = v.violation
                 ORDER BY t.driver_race, v.total_violations DESC"
            }
            Self::StopsByYearMonthHour => {
                "SELECT
                     CAST(strftime('%Y', stop_date) AS INTEGER) AS year,
                     CAST(strftime('%m', stop_date) AS INTEGER) AS month,
                     CAST(strftime('%H', stop_time) AS INTEGER) AS hour,
                     COUNT(*) AS total_stops
                 FROM traffic_stops
                 GROUP BY year, month, hour
                 ORDER BY year, month, hour"
            }
            Self::RankedViolationRates => {
                "SELECT violation, search_rate, arrest_rate,
                     DENSE_RANK() OVER (ORDER BY search_rate DESC) AS search_rank,
                     DENSE_RANK() OVER (ORDER BY arrest_rate DESC) AS arrest_rank
                 FROM (
                     SELECT violation,
                         ROUND(CAST(SUM(search_conducted) AS REAL) / COUNT(*) * 100, 2) AS search_rate,
                         ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                     FROM traffic_stops
                     GROUP BY violation
                 ) AS rates
                 ORDER BY search_rank, arrest_rank"
            }
            Self::DemographicsByCountry => {
                "SELECT country_name, driver_age, driver_gender, driver_race, COUNT(*) AS count
                 FROM traffic_stops
                 GROUP BY country_name, driver_gender, driver_age, driver_race
                 ORDER BY country_name"
            }
            Self::TopArrestRateViolations => {
                "SELECT violation,
                     COUNT(*) AS total,
                     SUM(is_arrested) AS arrests,
                     ROUND(CAST(SUM(is_arrested) AS REAL) / COUNT(*) * 100, 2) AS arrest_rate
                 FROM traffic_stops
                 GROUP BY violation
                 ORDER BY arrest_rate DESC
                 LIMIT 5"
            }
        }
    }
}

/// What running an insight hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightOutcome {
    Rows(Table),
    /// Zero rows, or the store could not be reached.
    NoResult,
}

impl InsightOutcome {
    pub fn from_table(table: Table) -> Self {
        if table.is_empty() {
            Self::NoResult
        } else {
            Self::Rows(table)
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match self {
            Self::Rows(t) => Some(t),
            Self::NoResult => None,
        }
    }
}
