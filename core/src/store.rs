//! Read-only data access over the traffic-stop store.
//!
//! RULE: Only store.rs runs SQL on behalf of the dashboard.
//! Every fetch opens its own connection and releases it before returning,
//! on the success path and the failure path alike. Nothing is cached.

use crate::{
    error::CheckResult,
    stop::TrafficStop,
    table::{Cell, Table},
    types::SELECT_ALL_STOPS,
};
use log::{debug, error};
use rusqlite::{Connection, OpenFlags};

pub struct StopStore {
    path: String,
}

impl StopStore {
    /// A store over the SQLite database at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> CheckResult<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(conn)
    }

    /// Run `sql` on a fresh connection and materialize every row.
    pub fn try_fetch(&self, sql: &str) -> CheckResult<Table> {
        let conn = self.connect()?;
        let result = materialize(&conn, sql);
        drop(conn);
        let table = result?;
        debug!(
            "fetched {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            self.path
        );
        Ok(table)
    }

    /// Best-effort fetch: a failure is reported and degrades to an empty
    /// table (zero rows, zero columns). Never retried.
    pub fn fetch(&self, sql: &str) -> Table {
        match self.try_fetch(sql) {
            Ok(table) => table,
            Err(e) => {
                error!("Database connection error ({}): {e}", self.path);
                Table::empty()
            }
        }
    }

    /// The full `traffic_stops` table as a fresh snapshot.
    pub fn snapshot_table(&self) -> Table {
        self.fetch(SELECT_ALL_STOPS)
    }

    /// The full table decoded into typed rows.
    pub fn snapshot(&self) -> Vec<TrafficStop> {
        TrafficStop::from_table(&self.snapshot_table())
    }
}

fn materialize(conn: &Connection, sql: &str) -> CheckResult<Table> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(Cell::from(row.get_ref(i)?));
        }
        rows.push(cells);
    }

    Ok(Table::new(columns, rows))
}
