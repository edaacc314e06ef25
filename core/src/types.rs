//! Shared primitive types used across the dashboard.

/// The full-table query used to build a snapshot.
pub const SELECT_ALL_STOPS: &str = "SELECT * FROM traffic_stops";

/// A count of stops. Signed to match SQLite's INTEGER.
pub type StopCount = i64;
