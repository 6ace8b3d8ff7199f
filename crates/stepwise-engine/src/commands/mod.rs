//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for migration operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` and `warn!()`.

pub mod apply;
pub mod migrate_command;
pub mod revert;
pub mod status;

pub use apply::{apply_all, apply_next, ApplyReport};
pub use revert::{revert_last, RevertOutcome};
pub use status::migration_status;
