//! Reconciliation of discovered units against the ledger

use crate::model::{AppliedRecord, AppliedSet, MigrationUnit, Version};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One row of the status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub version: Version,
    pub name: String,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub has_up: bool,
    pub has_down: bool,
}

/// Applied/pending state of every discovered unit, ascending by version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
    /// Ledger versions with no discovered unit
    pub orphaned: Vec<Version>,
}

impl StatusReport {
    pub fn applied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.applied).count()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len() - self.applied_count()
    }
}

/// Build the report from units (already ascending) and ledger rows
pub fn reconcile(units: &[MigrationUnit], records: &[AppliedRecord]) -> StatusReport {
    let applied_at: HashMap<&Version, DateTime<Utc>> =
        records.iter().map(|r| (&r.version, r.applied_at)).collect();

    let entries = units
        .iter()
        .map(|unit| {
            let at = applied_at.get(unit.version()).copied();
            StatusEntry {
                version: unit.version().clone(),
                name: unit.name().to_string(),
                applied: at.is_some(),
                applied_at: at,
                has_up: unit.up_script().is_some(),
                has_down: unit.down_script().is_some(),
            }
        })
        .collect();

    let set: AppliedSet = records.iter().map(|r| r.version.clone()).collect();

    StatusReport {
        entries,
        orphaned: set.orphans(units),
    }
}
