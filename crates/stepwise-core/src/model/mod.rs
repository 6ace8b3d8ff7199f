//! Domain model for migration runs
//!
//! - [`Version`]: ordered migration identifier
//! - [`MigrationUnit`]: one version with its optional up/down scripts
//! - [`AppliedRecord`] / [`AppliedSet`]: ledger contents
//! - [`parse_filename`]: pure filename convention parser

pub mod applied;
pub mod filename;
pub mod unit;
pub mod version;

pub use applied::{AppliedRecord, AppliedSet};
pub use filename::{parse_filename, FileParse, ParsedFilename, SCRIPT_EXTENSION};
pub use unit::{Direction, MigrationUnit};
pub use version::Version;
