//! Migration runner
//!
//! Provides:
//! - Single-unit apply and revert, each inside one transaction
//! - Ledger row written or removed in the same transaction as the script

mod runner;

pub use runner::{apply_unit, revert_unit};
