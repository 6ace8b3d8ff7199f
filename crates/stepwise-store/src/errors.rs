//! Error handling for stepwise-store
//!
//! Wraps driver and IO failures into the core `MigrateError` taxonomy

use stepwise_core::errors::MigrateError;
use stepwise_core::{Direction, MigrationUnit};
use std::path::Path;

/// Result type alias using MigrateError
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Create a ledger error from rusqlite::Error
pub fn ledger_error(op: &str, err: rusqlite::Error) -> MigrateError {
    MigrateError::Ledger {
        op: op.to_string(),
        reason: err.to_string(),
    }
}

/// Create an execution error for a failed script
pub fn execution_error(unit: &MigrationUnit, direction: Direction, err: rusqlite::Error) -> MigrateError {
    MigrateError::Execution {
        version: unit.version().to_string(),
        direction,
        reason: err.to_string(),
    }
}

/// Create an error for a transaction that could not begin or commit
pub fn transaction_error(unit: &MigrationUnit, stage: &str, err: rusqlite::Error) -> MigrateError {
    MigrateError::Transaction {
        version: unit.version().to_string(),
        reason: format!("{} failed: {}", stage, err),
    }
}

/// Create a connection error from rusqlite::Error
pub fn connection_error(err: rusqlite::Error) -> MigrateError {
    MigrateError::Connection {
        reason: err.to_string(),
    }
}

/// Create a directory-listing error
pub fn directory_error(path: &Path, err: std::io::Error) -> MigrateError {
    MigrateError::DirectoryUnreadable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Create a script-read error
pub fn script_error(path: &Path, err: std::io::Error) -> MigrateError {
    MigrateError::ScriptUnreadable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
