//! Migration runner
//!
//! Executes one unit's script and the matching ledger change atomically.
//! Callers decide which unit to run; nothing here consults the applied set.

use crate::errors::{execution_error, transaction_error, Result};
use crate::ledger;
use rusqlite::Connection;
use stepwise_core::{Direction, MigrationUnit};

/// Apply `unit`'s up script and record its version
///
/// # Errors
///
/// - `MissingScript` if the unit has no up script (no transaction is opened)
/// - `Execution` if the script fails; the transaction is rolled back
/// - `Ledger` if the version cannot be recorded; the transaction is rolled back
/// - `Transaction` if the transaction cannot begin or commit
pub fn apply_unit(conn: &mut Connection, unit: &MigrationUnit) -> Result<()> {
    run_in_transaction(conn, unit, Direction::Up)
}

/// Apply `unit`'s down script and remove its version from the ledger
///
/// # Errors
///
/// Same as [`apply_unit`], with `MissingScript` reported for the down script.
pub fn revert_unit(conn: &mut Connection, unit: &MigrationUnit) -> Result<()> {
    run_in_transaction(conn, unit, Direction::Down)
}

fn run_in_transaction(conn: &mut Connection, unit: &MigrationUnit, direction: Direction) -> Result<()> {
    let sql = unit.require_script(direction)?;

    let tx = conn
        .transaction()
        .map_err(|e| transaction_error(unit, "begin", e))?;

    // Dropping `tx` on any early return rolls back
    tx.execute_batch(sql)
        .map_err(|e| execution_error(unit, direction, e))?;

    match direction {
        Direction::Up => ledger::record(&tx, unit.version())?,
        Direction::Down => ledger::unrecord(&tx, unit.version())?,
    }

    tx.commit()
        .map_err(|e| transaction_error(unit, "commit", e))?;

    tracing::debug!(
        version = %unit.version(),
        direction = %direction,
        "migration committed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::MigrateError;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ledger::ensure_ledger(&conn).unwrap();
        conn
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_apply_then_revert() {
        let mut conn = setup();
        let unit = MigrationUnit::new(
            "000001",
            "create_users",
            Some("CREATE TABLE users (id INTEGER PRIMARY KEY);".into()),
            Some("DROP TABLE users;".into()),
        );

        apply_unit(&mut conn, &unit).unwrap();
        assert!(table_exists(&conn, "users"));
        assert!(ledger::load_applied(&conn).unwrap().contains(unit.version()));

        revert_unit(&mut conn, &unit).unwrap();
        assert!(!table_exists(&conn, "users"));
        assert!(ledger::load_applied(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_failed_script_leaves_nothing_behind() {
        let mut conn = setup();
        let unit = MigrationUnit::new(
            "000001",
            "half_broken",
            Some("CREATE TABLE a (id INTEGER); CREATE TABLE oops (".into()),
            None,
        );

        let err = apply_unit(&mut conn, &unit).unwrap_err();
        assert!(matches!(err, MigrateError::Execution { direction: Direction::Up, .. }));
        assert!(!table_exists(&conn, "a"));
        assert!(ledger::load_applied(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_missing_script_opens_no_transaction() {
        let mut conn = setup();
        let unit = MigrationUnit::new("000001", "only_down", None, Some("SELECT 1;".into()));

        let err = apply_unit(&mut conn, &unit).unwrap_err();
        assert!(matches!(err, MigrateError::MissingScript { .. }));
        assert!(conn.is_autocommit());
    }

    #[test]
    fn test_revert_without_ledger_row_rolls_back_script() {
        let mut conn = setup();
        conn.execute_batch("CREATE TABLE keep_me (id INTEGER);").unwrap();
        let unit = MigrationUnit::new("000009", "drop", None, Some("DROP TABLE keep_me;".into()));

        let err = revert_unit(&mut conn, &unit).unwrap_err();
        assert!(matches!(err, MigrateError::Ledger { .. }));
        assert!(table_exists(&conn, "keep_me"));
    }
}
