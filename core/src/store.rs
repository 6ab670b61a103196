//! SQLite persistence layer and record source of the report.
//!
//! RULE: Only the store talks to the database.
//! The aggregator receives fully materialized records and never runs SQL.

use crate::error::ReportResult;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;

mod chargeback;

pub use chargeback::{NewFollowup, NewPayment};

/// Text format of every date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ChargebackStore {
    conn: Connection,
}

impl ChargebackStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests and demo runs).
    pub fn in_memory() -> ReportResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ReportResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_chargebacks.sql"))?;
        Ok(())
    }
}

/// Parse a stored date. Date-only values are read as midnight.
/// Empty or unparseable text yields `None`.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|e| log::warn!("Skipping unparseable date '{text}': {e}"))
        .ok()
}

pub fn format_date(value: NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}
