use crate::errors::{MigrateError, Result};
use crate::model::Version;
use serde::{Deserialize, Serialize};

/// Which script of a unit is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical migration: a version bundling optional up and down scripts
///
/// Built once per discovery pass and never mutated afterwards. Either script
/// may be absent; absence only becomes an error when that direction is
/// executed (see [`MigrationUnit::require_script`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    version: Version,
    name: String,
    up_script: Option<String>,
    down_script: Option<String>,
}

impl MigrationUnit {
    pub fn new(
        version: impl Into<Version>,
        name: impl Into<String>,
        up_script: Option<String>,
        down_script: Option<String>,
    ) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
            up_script,
            down_script,
        }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn up_script(&self) -> Option<&str> {
        self.up_script.as_deref()
    }

    pub fn down_script(&self) -> Option<&str> {
        self.down_script.as_deref()
    }

    pub fn script(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Up => self.up_script(),
            Direction::Down => self.down_script(),
        }
    }

    /// Script for `direction`, or `MissingScript` naming this unit's version
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::MissingScript`] when the script is absent.
    pub fn require_script(&self, direction: Direction) -> Result<&str> {
        self.script(direction)
            .ok_or_else(|| MigrateError::MissingScript {
                version: self.version.to_string(),
                direction,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_script_present() {
        let unit = MigrationUnit::new("000001", "init", Some("CREATE TABLE t (id INT);".into()), None);
        assert_eq!(
            unit.require_script(Direction::Up).unwrap(),
            "CREATE TABLE t (id INT);"
        );
    }

    #[test]
    fn test_require_script_missing_names_version() {
        let unit = MigrationUnit::new("000002", "add_col", Some("SELECT 1;".into()), None);
        let err = unit.require_script(Direction::Down).unwrap_err();
        assert_eq!(
            err,
            MigrateError::MissingScript {
                version: "000002".to_string(),
                direction: Direction::Down,
            }
        );
        assert!(err.to_string().contains("000002"));
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
