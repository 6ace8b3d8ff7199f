//! stepwise Core - Pure domain layer of the migration engine
//!
//! This crate provides everything that does not touch a database or a
//! filesystem:
//! - Version ordering, migration units and the applied-version set
//! - Filename convention parsing and unit assembly
//! - Selection rules (next pending, last applied) and status reconciliation
//! - Status table rendering
//! - Error and logging facilities shared by the other crates

pub mod discovery;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod observer;
pub mod plan;
pub mod render;
pub mod status;

pub use stepwise_core_types as types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, MigrateError, Result};
pub use model::{AppliedRecord, AppliedSet, Direction, MigrationUnit, Version};
pub use observer::{MigrationObserver, NoopObserver};
pub use status::{StatusEntry, StatusReport};
