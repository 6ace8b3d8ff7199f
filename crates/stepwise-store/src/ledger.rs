//! Applied-state ledger
//!
//! The `schema_migrations` table records one row per applied version.
//! `record` and `unrecord` take a [`Transaction`] so a ledger change can only
//! happen inside the transaction that carries the matching schema change.

use crate::errors::{ledger_error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, Transaction};
use stepwise_core::{AppliedRecord, AppliedSet, MigrateError, Version};

/// Name of the ledger table
pub const LEDGER_TABLE: &str = "schema_migrations";

/// Format SQLite's CURRENT_TIMESTAMP produces (UTC)
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Create the ledger table if it doesn't exist
pub fn ensure_ledger(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .map_err(|e| ledger_error("ensure_ledger", e))?;

    Ok(())
}

/// Load the set of applied versions
pub fn load_applied(conn: &Connection) -> Result<AppliedSet> {
    let mut stmt = conn
        .prepare("SELECT version FROM schema_migrations")
        .map_err(|e| ledger_error("load_applied", e))?;
    let versions = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| ledger_error("load_applied", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ledger_error("load_applied", e))?;

    Ok(versions.into_iter().map(Version::from).collect())
}

/// Load full ledger rows, in insertion order
pub fn load_records(conn: &Connection) -> Result<Vec<AppliedRecord>> {
    let mut stmt = conn
        .prepare("SELECT version, applied_at FROM schema_migrations ORDER BY rowid")
        .map_err(|e| ledger_error("load_records", e))?;
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(|e| ledger_error("load_records", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ledger_error("load_records", e))?;

    rows.into_iter()
        .map(|(version, applied_at)| {
            let naive = NaiveDateTime::parse_from_str(&applied_at, SQLITE_TIMESTAMP_FORMAT)
                .map_err(|e| MigrateError::Ledger {
                    op: "load_records".to_string(),
                    reason: format!("invalid applied_at '{}' for version {}: {}", applied_at, version, e),
                })?;
            Ok(AppliedRecord {
                version: Version::from(version),
                applied_at: DateTime::from_naive_utc_and_offset(naive, Utc),
            })
        })
        .collect()
}

/// Insert the ledger row for `version`
pub fn record(tx: &Transaction<'_>, version: &Version) -> Result<()> {
    tx.execute(
        "INSERT INTO schema_migrations (version) VALUES (?1)",
        [version.as_str()],
    )
    .map_err(|e| ledger_error("record", e))?;

    Ok(())
}

/// Delete the ledger row for `version`
///
/// A missing row is an error: the caller believed the version was applied.
pub fn unrecord(tx: &Transaction<'_>, version: &Version) -> Result<()> {
    let deleted = tx
        .execute(
            "DELETE FROM schema_migrations WHERE version = ?1",
            [version.as_str()],
        )
        .map_err(|e| ledger_error("unrecord", e))?;

    if deleted == 0 {
        return Err(MigrateError::Ledger {
            op: "unrecord".to_string(),
            reason: format!("no ledger row for version {}", version),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_ledger_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_ledger(&conn).unwrap();
        ensure_ledger(&conn).unwrap();
        assert!(load_applied(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_record_then_load() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_ledger(&conn).unwrap();

        let tx = conn.transaction().unwrap();
        record(&tx, &Version::new("000001")).unwrap();
        tx.commit().unwrap();

        let applied = load_applied(&conn).unwrap();
        assert!(applied.contains(&Version::new("000001")));

        let records = load_records(&conn).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, Version::new("000001"));
    }

    #[test]
    fn test_record_twice_is_ledger_error() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_ledger(&conn).unwrap();

        let tx = conn.transaction().unwrap();
        record(&tx, &Version::new("000001")).unwrap();
        let err = record(&tx, &Version::new("000001")).unwrap_err();
        assert!(matches!(err, MigrateError::Ledger { ref op, .. } if op == "record"));
    }

    #[test]
    fn test_unrecord_missing_row_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_ledger(&conn).unwrap();

        let tx = conn.transaction().unwrap();
        assert!(unrecord(&tx, &Version::new("000042")).is_err());
    }

    #[test]
    fn test_uncommitted_record_is_rolled_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_ledger(&conn).unwrap();

        {
            let tx = conn.transaction().unwrap();
            record(&tx, &Version::new("000001")).unwrap();
            // dropped without commit
        }

        assert!(load_applied(&conn).unwrap().is_empty());
    }
}
