use crate::model::Direction;
use stepwise_core_types::RunId;
use thiserror::Error;

/// Result type alias using MigrateError
pub type Result<T> = std::result::Result<T, MigrateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log filtering and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Migrations directory or one of its scripts could not be read,
    /// or two files claim the same version and direction
    Discovery,
    /// The unit being executed lacks the script for the requested direction
    MissingScript,
    /// A schema script (or its surrounding transaction) failed
    Execution,
    /// Ledger table creation, read or write failed
    Ledger,
    /// The ledger holds a version that no discovered unit provides
    OrphanedVersion,
    /// Unrecognized dispatcher action
    InvalidAction,
    /// Database could not be opened or did not answer a ping
    Connection,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Discovery => "ERR_DISCOVERY",
            ExErrorKind::MissingScript => "ERR_MISSING_SCRIPT",
            ExErrorKind::Execution => "ERR_EXECUTION",
            ExErrorKind::Ledger => "ERR_LEDGER",
            ExErrorKind::OrphanedVersion => "ERR_ORPHANED_VERSION",
            ExErrorKind::InvalidAction => "ERR_INVALID_ACTION",
            ExErrorKind::Connection => "ERR_CONNECTION",
        }
    }
}

/// Canonical structured error type
///
/// Flat, log-friendly view of a [`MigrateError`]: a classification plus the
/// context fields an operator needs to find the offending unit.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    version: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            version: None,
            path: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add migration version context
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run id context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for migration runs
///
/// Every variant is fatal to the current run. Display messages always name
/// the offending version, file or action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrateError {
    // ===== Discovery =====
    /// Migrations directory could not be listed
    #[error("failed to read migrations directory {path}: {reason}")]
    DirectoryUnreadable { path: String, reason: String },

    /// A migration script matched the naming convention but could not be read
    #[error("failed to read migration file {path}: {reason}")]
    ScriptUnreadable { path: String, reason: String },

    /// Two files provide the same direction for one version
    #[error("duplicate {direction} script for version {version}: {first} and {second}")]
    DuplicateScript {
        version: String,
        direction: Direction,
        first: String,
        second: String,
    },

    // ===== Execution =====
    /// The unit being executed has no script for the requested direction
    #[error("missing {direction} migration file for version {version}")]
    MissingScript { version: String, direction: Direction },

    /// The schema script failed; the unit's transaction was rolled back
    #[error("failed to execute {direction} migration {version}: {reason}")]
    Execution {
        version: String,
        direction: Direction,
        reason: String,
    },

    /// Beginning or committing the unit's transaction failed
    #[error("transaction for migration {version} failed: {reason}")]
    Transaction { version: String, reason: String },

    // ===== Ledger =====
    /// Ledger table creation, read or write failed
    #[error("ledger {op} failed: {reason}")]
    Ledger { op: String, reason: String },

    /// The highest applied version has no discovered unit
    #[error("orphaned applied version {version}: no migration file provides it")]
    OrphanedVersion { version: String },

    // ===== Dispatch =====
    /// Action selector is not one of up, down, status
    #[error("unknown action: {action}. Use 'up', 'down', or 'status'")]
    InvalidAction { action: String },

    // ===== Connection =====
    /// Database could not be opened or pinged
    #[error("database connection failed: {reason}")]
    Connection { reason: String },
}

impl From<MigrateError> for ExError {
    fn from(err: MigrateError) -> Self {
        let message = err.to_string();
        match err {
            MigrateError::DirectoryUnreadable { path, .. } => ExError::new(ExErrorKind::Discovery)
                .with_op("discover")
                .with_path(path)
                .with_message(message),

            MigrateError::ScriptUnreadable { path, .. } => ExError::new(ExErrorKind::Discovery)
                .with_op("read_script")
                .with_path(path)
                .with_message(message),

            MigrateError::DuplicateScript { version, .. } => ExError::new(ExErrorKind::Discovery)
                .with_op("assemble_units")
                .with_version(version)
                .with_message(message),

            MigrateError::MissingScript { version, direction } => {
                ExError::new(ExErrorKind::MissingScript)
                    .with_op(op_for(direction))
                    .with_version(version)
                    .with_message(message)
            }

            MigrateError::Execution {
                version, direction, ..
            } => ExError::new(ExErrorKind::Execution)
                .with_op(op_for(direction))
                .with_version(version)
                .with_message(message),

            MigrateError::Transaction { version, .. } => ExError::new(ExErrorKind::Execution)
                .with_op("transaction")
                .with_version(version)
                .with_message(message),

            MigrateError::Ledger { op, .. } => ExError::new(ExErrorKind::Ledger)
                .with_op(op)
                .with_message(message),

            MigrateError::OrphanedVersion { version } => {
                ExError::new(ExErrorKind::OrphanedVersion)
                    .with_op("revert_last")
                    .with_version(version)
                    .with_message(message)
            }

            MigrateError::InvalidAction { .. } => ExError::new(ExErrorKind::InvalidAction)
                .with_op("dispatch")
                .with_message(message),

            MigrateError::Connection { .. } => ExError::new(ExErrorKind::Connection)
                .with_op("connect")
                .with_message(message),
        }
    }
}

fn op_for(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "apply_unit",
        Direction::Down => "revert_unit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::Discovery, "ERR_DISCOVERY"),
            (ExErrorKind::MissingScript, "ERR_MISSING_SCRIPT"),
            (ExErrorKind::Execution, "ERR_EXECUTION"),
            (ExErrorKind::Ledger, "ERR_LEDGER"),
            (ExErrorKind::OrphanedVersion, "ERR_ORPHANED_VERSION"),
            (ExErrorKind::InvalidAction, "ERR_INVALID_ACTION"),
            (ExErrorKind::Connection, "ERR_CONNECTION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_code_op_and_version() {
        let err = ExError::new(ExErrorKind::Execution)
            .with_op("apply_unit")
            .with_version("000002")
            .with_message("boom");
        assert_eq!(
            err.to_string(),
            "[ERR_EXECUTION] in operation 'apply_unit': boom (version: 000002)"
        );
    }

    #[test]
    fn test_run_id_is_carried() {
        let run_id = RunId::from_string("run-7".to_string());
        let err = ExError::new(ExErrorKind::Ledger).with_run_id(run_id.clone());
        assert_eq!(err.run_id(), Some(&run_id));
    }
}
