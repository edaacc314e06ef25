//! The traffic-stop record and snapshot decoding.

use crate::table::{Cell, Table};
use serde::{Deserialize, Serialize};

/// One row of the `traffic_stops` fact table.
/// Every column is nullable in storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficStop {
    pub stop_date: Option<String>,
    pub stop_time: Option<String>,
    pub country_name: Option<String>,
    pub driver_gender: Option<String>,
    pub driver_age: Option<i64>,
    pub driver_race: Option<String>,
    pub search_conducted: Option<bool>,
    pub search_type: Option<String>,
    pub drugs_related_stop: Option<bool>,
    pub stop_duration: Option<String>,
    pub vehicle_number: Option<String>,
    pub violation: Option<String>,
    pub stop_outcome: Option<String>,
    pub is_arrested: Option<bool>,
}

/// Column order of the fact table.
pub const STOP_COLUMNS: [&str; 14] = [
    "stop_date",
    "stop_time",
    "country_name",
    "driver_gender",
    "driver_age",
    "driver_race",
    "search_conducted",
    "search_type",
    "drugs_related_stop",
    "stop_duration",
    "vehicle_number",
    "violation",
    "stop_outcome",
    "is_arrested",
];

impl TrafficStop {
    /// Decode every row of a full-table fetch.
    /// Columns the table does not carry decode as `None`.
    pub fn from_table(table: &Table) -> Vec<TrafficStop> {
        let idx: Vec<Option<usize>> = STOP_COLUMNS
            .iter()
            .map(|name| table.column_index(name))
            .collect();

        table
            .rows
            .iter()
            .map(|row| {
                let cell = |slot: usize| idx[slot].and_then(|i| row.get(i));
                TrafficStop {
                    stop_date: cell(0).and_then(Cell::to_text),
                    stop_time: cell(1).and_then(Cell::to_text),
                    country_name: cell(2).and_then(Cell::to_text),
                    driver_gender: cell(3).and_then(Cell::to_text),
                    driver_age: cell(4).and_then(Cell::as_i64),
                    driver_race: cell(5).and_then(Cell::to_text),
                    search_conducted: cell(6).and_then(decode_flag),
                    search_type: cell(7).and_then(Cell::to_text),
                    drugs_related_stop: cell(8).and_then(decode_flag),
                    stop_duration: cell(9).and_then(Cell::to_text),
                    vehicle_number: cell(10).and_then(Cell::to_text),
                    violation: cell(11).and_then(Cell::to_text),
                    stop_outcome: cell(12).and_then(Cell::to_text),
                    is_arrested: cell(13).and_then(decode_flag),
                }
            })
            .collect()
    }
}

/// Boolean-like columns are stored as 0/1, occasionally as text.
fn decode_flag(cell: &Cell) -> Option<bool> {
    match cell {
        Cell::Integer(0) => Some(false),
        Cell::Integer(1) => Some(true),
        Cell::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        },
        _ => None,
    }
}
