//! Read-only status report

use rusqlite::Connection;
use std::time::Instant;
use stepwise_core::status::reconcile;
use stepwise_core::types::RunContext;
use stepwise_core::{log_op_end, log_op_error, log_op_start, MigrationUnit, Result, StatusReport};
use stepwise_store::ledger;

/// Report every discovered unit with its applied flag, plus ledger orphans
///
/// Never opens a write transaction.
pub fn migration_status(conn: &Connection, units: &[MigrationUnit], ctx: &RunContext) -> Result<StatusReport> {
    log_op_start!(ctx, "status");
    let start = Instant::now();

    let report = ledger::load_records(conn)
        .map(|records| reconcile(units, &records))
        .map_err(|e| {
            log_op_error!(
                ctx,
                "status",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        ctx,
        "status",
        duration_ms = start.elapsed().as_millis() as u64,
        applied = report.applied_count(),
        pending = report.pending_count()
    );

    Ok(report)
}
