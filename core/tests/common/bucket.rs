//! Rust-side classifiers for the catalog's CASE buckets.
//!
//! Each one follows the SQL boundaries exactly, including what the ELSE
//! branch does with a time SQLite cannot parse.

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Under18,
    From18To25,
    From26To40,
    From41To60,
    Over60,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        Self::Under18,
        Self::From18To25,
        Self::From26To40,
        Self::From41To60,
        Self::Over60,
    ];

    /// Interior buckets are inclusive on both ends.
    pub fn from_age(age: i64) -> Self {
        match age {
            a if a < 18 => Self::Under18,
            18..=25 => Self::From18To25,
            26..=40 => Self::From26To40,
            41..=60 => Self::From41To60,
            _ => Self::Over60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under18 => "Under 18",
            Self::From18To25 => "18-25",
            Self::From26To40 => "26-40",
            Self::From41To60 => "41-60",
            Self::Over60 => "60+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Morning 5-11, Afternoon 12-16, Evening 17-20, Night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// An unreadable time has a NULL hour, which lands in the ELSE branch.
    pub fn of_stop_time(stop_time: &str) -> Self {
        hour_of(stop_time).map_or(Self::Night, Self::from_hour)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    /// Night is 20:00 onwards or before 06:00.
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 20 || hour < 6 {
            Self::Night
        } else {
            Self::Day
        }
    }

    /// A NULL hour makes the Night condition NULL, so the row is Day.
    pub fn of_stop_time(stop_time: &str) -> Self {
        hour_of(stop_time).map_or(Self::Day, Self::from_hour)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

/// Hour of day from a stored `HH:MM:SS` or `HH:MM` time.
///
/// The hour must be two digits: `strftime('%H', ...)` yields NULL for
/// `8:15:00`, and so does this.
pub fn hour_of(stop_time: &str) -> Option<u32> {
    let s = stop_time.trim();
    let bytes = s.as_bytes();
    if bytes.len() < 5 || !bytes[..2].iter().all(u8::is_ascii_digit) || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
        .map(|t| t.hour())
}
