//! stepwise Engine - Orchestration layer
//!
//! Coordinates discovery, the ledger and the single-unit runner into the
//! `up`, `down` and `status` actions, and owns their lifecycle logging.

pub mod commands;

pub use commands::migrate_command::{
    apply_migrate_command, MigrateAction, MigrateCommand, MigrateOutcome,
};
