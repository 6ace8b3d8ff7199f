//! Top-level `migrate` command dispatch

use crate::commands::apply::{apply_all, ApplyReport};
use crate::commands::revert::{revert_last, RevertOutcome};
use crate::commands::status::migration_status;
use rusqlite::Connection;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use stepwise_core::types::RunContext;
use stepwise_core::{
    log_op_end, log_op_error, log_op_start, MigrateError, MigrationObserver, Result, StatusReport,
};
use stepwise_store::{discovery, ledger};

/// The three terminal actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply every pending unit
    Up,
    /// Revert the most recent unit
    Down,
    /// Report only
    Status,
}

impl MigrateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrateAction::Up => "up",
            MigrateAction::Down => "down",
            MigrateAction::Status => "status",
        }
    }
}

impl FromStr for MigrateAction {
    type Err = MigrateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(MigrateAction::Up),
            "down" => Ok(MigrateAction::Down),
            "status" => Ok(MigrateAction::Status),
            other => Err(MigrateError::InvalidAction {
                action: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MigrateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `migrate` invocation
#[derive(Debug, Clone)]
pub struct MigrateCommand {
    pub action: MigrateAction,
    pub migrations_dir: PathBuf,
}

/// Result of applying a migrate command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrateOutcome {
    Up(ApplyReport),
    Down(RevertOutcome),
    Status(StatusReport),
}

/// Discover units, make sure the ledger exists, then run the action
///
/// Any failure ends the run; whatever committed before it stays committed.
pub fn apply_migrate_command(
    cmd: MigrateCommand,
    conn: &mut Connection,
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<MigrateOutcome> {
    log_op_start!(ctx, "migrate", action = cmd.action.as_str());
    let start = Instant::now();

    let outcome = dispatch(&cmd, conn, ctx, observer).map_err(|e| {
        log_op_error!(
            ctx,
            "migrate",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            action = cmd.action.as_str()
        );
        e
    })?;

    log_op_end!(
        ctx,
        "migrate",
        duration_ms = start.elapsed().as_millis() as u64,
        action = cmd.action.as_str()
    );

    Ok(outcome)
}

fn dispatch(
    cmd: &MigrateCommand,
    conn: &mut Connection,
    ctx: &RunContext,
    observer: &dyn MigrationObserver,
) -> Result<MigrateOutcome> {
    let units = discovery::discover(&cmd.migrations_dir)?;
    tracing::debug!(
        dir = %cmd.migrations_dir.display(),
        units = units.len(),
        "discovered migrations"
    );

    ledger::ensure_ledger(conn)?;

    match cmd.action {
        MigrateAction::Up => apply_all(conn, &units, ctx, observer).map(MigrateOutcome::Up),
        MigrateAction::Down => revert_last(conn, &units, ctx, observer).map(MigrateOutcome::Down),
        MigrateAction::Status => migration_status(conn, &units, ctx).map(MigrateOutcome::Status),
    }
}
