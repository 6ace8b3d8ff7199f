//! Forward application of pending units

use rusqlite::Connection;
use serde::Serialize;
use std::time::Instant;
use stepwise_core::plan;
use stepwise_core::types::RunContext;
use stepwise_core::{
    log_op_end, log_op_error, log_op_start, AppliedSet, Direction, MigrationObserver,
    MigrationUnit, Result, Version,
};
use stepwise_store::{ledger, migrations};

/// What a forward run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Versions applied by this run, in order
    pub applied: Vec<Version>,
    /// Versions that were already applied and passed over
    pub skipped: Vec<Version>,
}

/// Apply the first pending unit, if any
///
/// Returns the applied version, or `None` when nothing is pending.
///
/// # Errors
///
/// - `MissingScript`: the pending unit has no up script
/// - `Execution` / `Transaction` / `Ledger`: the unit failed and was rolled back
pub fn apply_next(
    conn: &mut Connection,
    units: &[MigrationUnit],
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<Option<Version>> {
    let applied = ledger::load_applied(conn)?;

    match plan::next_pending(units, &applied) {
        Some(unit) => {
            apply_one(conn, unit, ctx, observer)?;
            Ok(Some(unit.version().clone()))
        }
        None => Ok(None),
    }
}

/// Apply every pending unit in ascending order, stopping at the first failure
///
/// Units already in the ledger are reported to the observer and skipped
/// without opening a transaction. Units applied before a failure stay applied.
///
/// # Errors
///
/// The first error raised by a unit; later units are not attempted.
pub fn apply_all(
    conn: &mut Connection,
    units: &[MigrationUnit],
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<ApplyReport> {
    let applied = ledger::load_applied(conn)?;
    warn_orphans(&applied, units);

    let mut report = ApplyReport::default();
    for unit in units {
        if applied.contains(unit.version()) {
            tracing::debug!(version = %unit.version(), "already applied");
            observer.on_skipped(unit);
            report.skipped.push(unit.version().clone());
            continue;
        }

        apply_one(conn, unit, ctx, observer)?;
        report.applied.push(unit.version().clone());
    }

    Ok(report)
}

fn apply_one(
    conn: &mut Connection,
    unit: &MigrationUnit,
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<()> {
    log_op_start!(ctx, "apply_unit", version = unit.version().as_str());
    let start = Instant::now();

    let result = unit.require_script(Direction::Up).and_then(|_| {
        observer.on_applying(unit);
        migrations::apply_unit(conn, unit)
    });

    match result {
        Ok(()) => {
            log_op_end!(
                ctx,
                "apply_unit",
                duration_ms = start.elapsed().as_millis() as u64,
                version = unit.version().as_str()
            );
            observer.on_applied(unit);
            Ok(())
        }
        Err(e) => {
            log_op_error!(
                ctx,
                "apply_unit",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                version = unit.version().as_str()
            );
            Err(e)
        }
    }
}

fn warn_orphans(applied: &AppliedSet, units: &[MigrationUnit]) {
    for orphan in applied.orphans(units) {
        tracing::warn!(
            version = %orphan,
            "applied version has no migration file, ignoring"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::{MigrateError, NoopObserver};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ledger::ensure_ledger(&conn).unwrap();
        conn
    }

    fn unit(version: &str, up: Option<&str>) -> MigrationUnit {
        MigrationUnit::new(version, "t", up.map(str::to_string), None)
    }

    #[test]
    fn test_apply_next_one_at_a_time() {
        let mut conn = setup();
        let ctx = RunContext::new();
        let units = vec![
            unit("1", Some("CREATE TABLE a (id INTEGER);")),
            unit("2", Some("CREATE TABLE b (id INTEGER);")),
        ];

        let first = apply_next(&mut conn, &units, &ctx, &NoopObserver).unwrap();
        assert_eq!(first, Some(Version::new("1")));
        let second = apply_next(&mut conn, &units, &ctx, &NoopObserver).unwrap();
        assert_eq!(second, Some(Version::new("2")));
        assert_eq!(apply_next(&mut conn, &units, &ctx, &NoopObserver).unwrap(), None);
    }

    #[test]
    fn test_apply_all_reports_skipped() {
        let mut conn = setup();
        let ctx = RunContext::new();
        let units = vec![unit("1", Some("SELECT 1;")), unit("2", Some("SELECT 2;"))];

        apply_next(&mut conn, &units, &ctx, &NoopObserver).unwrap();
        let report = apply_all(&mut conn, &units, &ctx, &NoopObserver).unwrap();

        assert_eq!(report.skipped, vec![Version::new("1")]);
        assert_eq!(report.applied, vec![Version::new("2")]);
    }

    #[test]
    fn test_apply_all_missing_up_script() {
        let mut conn = setup();
        let ctx = RunContext::new();
        let units = vec![unit("1", None)];

        let err = apply_all(&mut conn, &units, &ctx, &NoopObserver).unwrap_err();
        assert!(matches!(err, MigrateError::MissingScript { direction: Direction::Up, .. }));
    }
}
