//! Grouping of parsed script files into migration units
//!
//! Filesystem-free half of discovery: callers feed every
//! [`FileParse::Parsed`](crate::model::FileParse) entry together with its
//! contents, then take the ascending unit list.

use crate::errors::{MigrateError, Result};
use crate::model::{Direction, MigrationUnit, ParsedFilename, Version};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct PendingUnit {
    name: Option<String>,
    up: Option<(String, String)>,
    down: Option<(String, String)>,
}

/// Accumulates up/down scripts per version
#[derive(Debug, Default)]
pub struct UnitAssembler {
    pending: BTreeMap<Version, PendingUnit>,
}

impl UnitAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one script file to the unit for its version
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::DuplicateScript`] when the version already has
    /// a script for the same direction.
    pub fn add(&mut self, parsed: ParsedFilename, file_name: &str, contents: String) -> Result<()> {
        let entry = self.pending.entry(parsed.version.clone()).or_default();

        let slot = match parsed.direction {
            Direction::Up => &mut entry.up,
            Direction::Down => &mut entry.down,
        };
        if let Some((first, _)) = slot {
            return Err(MigrateError::DuplicateScript {
                version: parsed.version.to_string(),
                direction: parsed.direction,
                first: first.clone(),
                second: file_name.to_string(),
            });
        }
        *slot = Some((file_name.to_string(), contents));

        // The up file names the unit when both are present
        if parsed.direction == Direction::Up || entry.name.is_none() {
            entry.name = Some(parsed.name);
        }
        Ok(())
    }

    /// Register `version` without contributing a script
    ///
    /// Used for versioned files that carry no direction marker: the unit
    /// exists, so executing it fails with `MissingScript`.
    pub fn claim(&mut self, version: Version, name: &str) {
        let entry = self.pending.entry(version).or_default();
        if entry.name.is_none() {
            entry.name = Some(name.to_string());
        }
    }

    /// Units sorted ascending by version
    pub fn finish(self) -> Vec<MigrationUnit> {
        self.pending
            .into_iter()
            .map(|(version, unit)| {
                MigrationUnit::new(
                    version,
                    unit.name.unwrap_or_default(),
                    unit.up.map(|(_, sql)| sql),
                    unit.down.map(|(_, sql)| sql),
                )
            })
            .collect()
    }
}
