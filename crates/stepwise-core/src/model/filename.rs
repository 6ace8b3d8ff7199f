//! Migration filename convention
//!
//! `<version>_<name>.<up|down>.sql`, split on the first `_`. The version
//! token is any non-empty text before it; the name may contain further `_`.

use crate::model::{Direction, Version};

/// Fixed extension of migration scripts
pub const SCRIPT_EXTENSION: &str = ".sql";

/// Components of a well-formed migration filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub version: Version,
    pub name: String,
    pub direction: Direction,
}

/// Outcome of classifying one directory entry name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileParse {
    /// Matches the convention
    Parsed(ParsedFilename),
    /// Versioned `.sql` file without a `.up`/`.down` marker
    ///
    /// Still claims its version, so the unit shows up as pending and fails
    /// when executed instead of vanishing.
    Undirected { version: Version, name: String },
    /// Not a migration script at all (wrong extension)
    Ignored,
    /// Has the script extension but breaks the convention
    Malformed(String),
}

/// Classify a filename against the migration naming convention
pub fn parse_filename(file_name: &str) -> FileParse {
    let Some(stem) = file_name.strip_suffix(SCRIPT_EXTENSION) else {
        return FileParse::Ignored;
    };

    let Some((version, rest)) = stem.split_once('_') else {
        return FileParse::Malformed("missing '_' between version and name".to_string());
    };
    if version.is_empty() {
        return FileParse::Malformed("empty version".to_string());
    }

    let (name, direction) = if let Some(name) = rest.strip_suffix(".up") {
        (name, Direction::Up)
    } else if let Some(name) = rest.strip_suffix(".down") {
        (name, Direction::Down)
    } else {
        return FileParse::Undirected {
            version: Version::new(version),
            name: rest.to_string(),
        };
    };

    FileParse::Parsed(ParsedFilename {
        version: Version::new(version),
        name: name.to_string(),
        direction,
    })
}
