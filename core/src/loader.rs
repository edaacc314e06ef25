//! Write side: schema migration and bulk loading of stop records.
//!
//! RULE: The dashboard never writes. This module exists for the ingest
//! step that pre-populates a database (the `generate` command and tests)
//! and is never reached from a dashboard interaction.

use crate::{error::CheckResult, stop::TrafficStop, types::StopCount};
use log::info;
use rusqlite::{params, Connection, OpenFlags};

pub struct StopLoader {
    conn: Connection,
}

impl StopLoader {
    /// Open (or create) the database at `path` for writing.
    pub fn open(path: &str) -> CheckResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> CheckResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> CheckResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_traffic_stops.sql"))?;
        Ok(())
    }

    /// Remove every stop. Used before regenerating a demo database.
    pub fn clear(&self) -> CheckResult<()> {
        self.conn.execute("DELETE FROM traffic_stops", [])?;
        Ok(())
    }

    /// Insert all stops in one transaction.
    pub fn insert_stops(&mut self, stops: &[TrafficStop]) -> CheckResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO traffic_stops (
                    stop_date, stop_time, country_name, driver_gender, driver_age,
                    driver_race, search_conducted, search_type, drugs_related_stop,
                    stop_duration, vehicle_number, violation, stop_outcome, is_arrested
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for s in stops {
                stmt.execute(params![
                    s.stop_date,
                    s.stop_time,
                    s.country_name,
                    s.driver_gender,
                    s.driver_age,
                    s.driver_race,
                    s.search_conducted,
                    s.search_type,
                    s.drugs_related_stop,
                    s.stop_duration,
                    s.vehicle_number,
                    s.violation,
                    s.stop_outcome,
                    s.is_arrested,
                ])?;
            }
        }
        tx.commit()?;
        info!("loaded {} traffic stops", stops.len());
        Ok(stops.len())
    }

    pub fn stop_count(&self) -> CheckResult<StopCount> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM traffic_stops", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_are_stored_as_zero_or_one() {
        let mut loader = StopLoader::in_memory().unwrap();
        loader.migrate().unwrap();
        loader
            .insert_stops(&[TrafficStop {
                search_conducted: Some(true),
                drugs_related_stop: Some(false),
                ..Default::default()
            }])
            .unwrap();

        let (searched, drugs, arrested): (i64, i64, Option<i64>) = loader
            .conn
            .query_row(
                "SELECT search_conducted, drugs_related_stop, is_arrested FROM traffic_stops",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!((searched, drugs, arrested), (1, 0, None));
    }

    #[test]
    fn schema_rejects_out_of_range_flags() {
        let loader = StopLoader::in_memory().unwrap();
        loader.migrate().unwrap();
        let result = loader
            .conn
            .execute("INSERT INTO traffic_stops (is_arrested) VALUES (2)", []);
        assert!(result.is_err());
        let result = loader
            .conn
            .execute("INSERT INTO traffic_stops (driver_age) VALUES (-1)", []);
        assert!(result.is_err());
    }

    #[test]
    fn clear_empties_the_table() {
        let mut loader = StopLoader::in_memory().unwrap();
        loader.migrate().unwrap();
        loader
            .insert_stops(&[TrafficStop::default(), TrafficStop::default()])
            .unwrap();
        assert_eq!(loader.stop_count().unwrap(), 2);
        loader.clear().unwrap();
        assert_eq!(loader.stop_count().unwrap(), 0);
    }
}
