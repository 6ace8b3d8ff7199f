//! Single-step reversal of the most recently applied unit

use rusqlite::Connection;
use serde::Serialize;
use std::time::Instant;
use stepwise_core::plan;
use stepwise_core::types::RunContext;
use stepwise_core::{
    log_op_end, log_op_error, log_op_start, Direction, MigrationObserver, MigrationUnit, Result,
    Version,
};
use stepwise_store::{ledger, migrations};

/// What a `down` run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "version", rename_all = "snake_case")]
pub enum RevertOutcome {
    Reverted(Version),
    NothingToRevert,
}

/// Revert exactly one unit: the highest-version discovered unit that is applied
///
/// # Errors
///
/// - `OrphanedVersion`: the highest ledger version has no discovered unit
/// - `MissingScript`: the unit has no down script (checked before any transaction)
/// - `Execution` / `Transaction` / `Ledger`: the revert failed and was rolled back
pub fn revert_last(
    conn: &mut Connection,
    units: &[MigrationUnit],
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<RevertOutcome> {
    let applied = ledger::load_applied(conn)?;

    let Some(unit) = plan::last_applied(units, &applied)? else {
        tracing::debug!("no applied migrations");
        observer.on_nothing_to_revert();
        return Ok(RevertOutcome::NothingToRevert);
    };

    log_op_start!(ctx, "revert_unit", version = unit.version().as_str());
    let start = Instant::now();

    let result = unit.require_script(Direction::Down).and_then(|_| {
        observer.on_reverting(unit);
        migrations::revert_unit(conn, unit)
    });

    if let Err(e) = result {
        log_op_error!(
            ctx,
            "revert_unit",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            version = unit.version().as_str()
        );
        return Err(e);
    }

    log_op_end!(
        ctx,
        "revert_unit",
        duration_ms = start.elapsed().as_millis() as u64,
        version = unit.version().as_str()
    );
    observer.on_reverted(unit);

    Ok(RevertOutcome::Reverted(unit.version().clone()))
}
