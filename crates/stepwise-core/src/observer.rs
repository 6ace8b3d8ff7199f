//! Progress observer trait and implementations
//!
//! The engine reports per-unit progress through a [`MigrationObserver`] as
//! each step happens, so a caller that halts on an error has already shown
//! everything that committed before it.

use crate::model::MigrationUnit;

/// Receives per-unit progress from the engine
///
/// All methods default to doing nothing.
pub trait MigrationObserver {
    /// An already-applied unit was passed over during `up`
    fn on_skipped(&self, _unit: &MigrationUnit) {}

    /// A transaction is about to be opened for this unit's up script
    fn on_applying(&self, _unit: &MigrationUnit) {}

    /// The unit's up script and ledger row committed
    fn on_applied(&self, _unit: &MigrationUnit) {}

    /// A transaction is about to be opened for this unit's down script
    fn on_reverting(&self, _unit: &MigrationUnit) {}

    /// The unit's down script committed and its ledger row is gone
    fn on_reverted(&self, _unit: &MigrationUnit) {}

    /// `down` found no applied unit
    fn on_nothing_to_revert(&self) {}
}

/// Observer that ignores every event
///
/// # Example
/// ```
/// use stepwise_core::observer::{MigrationObserver, NoopObserver};
/// use stepwise_core::model::MigrationUnit;
///
/// let unit = MigrationUnit::new("000001", "init", None, None);
/// NoopObserver.on_applied(&unit);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MigrationObserver for NoopObserver {}
