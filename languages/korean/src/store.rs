use std::path::Path;

use hanja_core::HanjaRecord;
use rusqlite::{Connection, OpenFlags, Row, params};

/// Read-only view of a built database
pub struct HanjaStore {
    conn: Connection,
}

impl HanjaStore {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// All records for a reading, in insertion order
    pub fn candidates(&self, hangul: &str) -> rusqlite::Result<Vec<HanjaRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, hangul, hanja, meaning, frequency FROM hanja WHERE hangul = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![hangul], record_from_row)?;
        rows.collect()
    }

    /// Every record, in insertion order
    pub fn records(&self) -> rusqlite::Result<Vec<HanjaRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, hangul, hanja, meaning, frequency FROM hanja ORDER BY id")?;
        let rows = stmt.query_map([], record_from_row)?;
        rows.collect()
    }

    pub fn record_count(&self) -> rusqlite::Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM hanja", [], |row| row.get(0))
    }

    /// Number of distinct hangul readings
    pub fn distinct_readings(&self) -> rusqlite::Result<usize> {
        self.conn
            .query_row("SELECT COUNT(DISTINCT hangul) FROM hanja", [], |row| {
                row.get(0)
            })
    }

    /// Whether reading lookups are served by `idx_hanja_hangul`
    pub fn has_hangul_index(&self) -> rusqlite::Result<bool> {
        let mut stmt = self
            .conn
            .prepare("EXPLAIN QUERY PLAN SELECT id FROM hanja WHERE hangul = ?1")?;
        let details = stmt.query_map(params!["가"], |row| row.get::<_, String>(3))?;
        for detail in details {
            if detail?.contains("idx_hanja_hangul") {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HanjaRecord> {
    Ok(HanjaRecord {
        id: row.get(0)?,
        hangul: row.get(1)?,
        hanja: row.get(2)?,
        meaning: row.get(3)?,
        frequency: row.get(4)?,
    })
}
