use crate::model::{MigrationUnit, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ledger row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRecord {
    pub version: Version,
    pub applied_at: DateTime<Utc>,
}

/// Membership set of applied versions
///
/// Carries no ordering; callers walk discovered units in [`Version`] order
/// and test membership here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedSet {
    versions: HashSet<Version>,
}

impl AppliedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    /// Returns `false` if the version was already present
    pub fn insert(&mut self, version: Version) -> bool {
        self.versions.insert(version)
    }

    /// Returns `false` if the version was not present
    pub fn remove(&mut self, version: &Version) -> bool {
        self.versions.remove(version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Highest applied version by [`Version`] order
    pub fn highest(&self) -> Option<&Version> {
        self.versions.iter().max()
    }

    /// Applied versions with no discovered unit, ascending
    pub fn orphans(&self, units: &[MigrationUnit]) -> Vec<Version> {
        let discovered: HashSet<&Version> = units.iter().map(|u| u.version()).collect();
        let mut orphans: Vec<Version> = self
            .versions
            .iter()
            .filter(|v| !discovered.contains(v))
            .cloned()
            .collect();
        orphans.sort();
        orphans
    }
}

impl FromIterator<Version> for AppliedSet {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}
