//! Selection rules over discovered units and the applied set
//!
//! Both rules rely only on the ascending order of `units`; the applied set
//! is consulted for membership alone.

use crate::errors::{MigrateError, Result};
use crate::model::{AppliedSet, MigrationUnit};

/// First unit, in ascending order, that is not yet applied
pub fn next_pending<'a>(units: &'a [MigrationUnit], applied: &AppliedSet) -> Option<&'a MigrationUnit> {
    units.iter().find(|u| !applied.contains(u.version()))
}

/// Highest-version discovered unit that is applied
///
/// `Ok(None)` means nothing is applied and reverting is a no-op.
///
/// # Errors
///
/// Returns [`MigrateError::OrphanedVersion`] when the highest version in the
/// ledger has no discovered unit. Reverting an older unit in that state would
/// skip over a change nobody can undo.
pub fn last_applied<'a>(
    units: &'a [MigrationUnit],
    applied: &AppliedSet,
) -> Result<Option<&'a MigrationUnit>> {
    let candidate = units.iter().rev().find(|u| applied.contains(u.version()));

    if let Some(highest) = applied.highest() {
        let covered = candidate.is_some_and(|u| u.version() >= highest);
        if !covered {
            return Err(MigrateError::OrphanedVersion {
                version: highest.to_string(),
            });
        }
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Version;

    fn units(versions: &[&str]) -> Vec<MigrationUnit> {
        versions
            .iter()
            .map(|v| MigrationUnit::new(*v, "u", Some("SELECT 1;".into()), Some("SELECT 1;".into())))
            .collect()
    }

    fn applied(versions: &[&str]) -> AppliedSet {
        versions.iter().map(|v| Version::new(*v)).collect()
    }

    #[test]
    fn test_next_pending_skips_applied() {
        let units = units(&["1", "2", "3"]);
        let next = next_pending(&units, &applied(&["1"])).unwrap();
        assert_eq!(next.version().as_str(), "2");
    }

    #[test]
    fn test_next_pending_none_when_all_applied() {
        let units = units(&["1", "2"]);
        assert!(next_pending(&units, &applied(&["1", "2"])).is_none());
    }

    #[test]
    fn test_last_applied_picks_highest() {
        let units = units(&["1", "2", "3"]);
        let last = last_applied(&units, &applied(&["1", "2"])).unwrap().unwrap();
        assert_eq!(last.version().as_str(), "2");
    }

    #[test]
    fn test_last_applied_empty_is_none() {
        let units = units(&["1", "2"]);
        assert!(last_applied(&units, &AppliedSet::new()).unwrap().is_none());
    }

    #[test]
    fn test_last_applied_orphan_on_top_fails() {
        let units = units(&["1", "2"]);
        let err = last_applied(&units, &applied(&["1", "2", "3"])).unwrap_err();
        assert_eq!(
            err,
            MigrateError::OrphanedVersion {
                version: "3".to_string()
            }
        );
    }

    #[test]
    fn test_last_applied_only_orphans_fails() {
        let units = units(&["1"]);
        assert!(last_applied(&units, &applied(&["7"])).is_err());
    }

    #[test]
    fn test_older_orphan_does_not_block() {
        let units = units(&["2", "3"]);
        let last = last_applied(&units, &applied(&["1", "3"])).unwrap().unwrap();
        assert_eq!(last.version().as_str(), "3");
    }
}
