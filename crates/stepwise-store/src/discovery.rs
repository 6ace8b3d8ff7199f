//! Migration discovery from a directory
//!
//! Lists the directory in filename order, classifies each entry with
//! `parse_filename`, reads the scripts that match and groups them into units.

use crate::errors::{directory_error, script_error, Result};
use stepwise_core::discovery::UnitAssembler;
use stepwise_core::model::{parse_filename, FileParse};
use stepwise_core::MigrationUnit;
use std::path::Path;

/// Discover migration units in `dir`, ascending by version
///
/// Files without the `.sql` extension and subdirectories are ignored.
/// A versioned `.sql` file lacking the `.up`/`.down` marker still yields a
/// unit (with no scripts) so executing it fails loudly. `.sql` files with no
/// recognizable version are skipped with a warning.
///
/// # Errors
///
/// - `DirectoryUnreadable`: `dir` cannot be listed
/// - `ScriptUnreadable`: a matching script cannot be read
/// - `DuplicateScript`: two files give the same direction for one version
pub fn discover(dir: &Path) -> Result<Vec<MigrationUnit>> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| directory_error(dir, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| directory_error(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    let mut assembler = UnitAssembler::new();

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };

        match parse_filename(&file_name) {
            FileParse::Parsed(parsed) => {
                let contents = std::fs::read_to_string(&path).map_err(|e| script_error(&path, e))?;
                tracing::debug!(
                    file = %file_name,
                    version = %parsed.version,
                    direction = %parsed.direction,
                    "discovered migration script"
                );
                assembler.add(parsed, &file_name, contents)?;
            }
            FileParse::Undirected { version, name } => {
                tracing::warn!(
                    file = %file_name,
                    version = %version,
                    "migration file has no .up or .down marker; unit has no scripts"
                );
                assembler.claim(version, &name);
            }
            FileParse::Ignored => {
                tracing::debug!(file = %file_name, "ignoring non-migration file");
            }
            FileParse::Malformed(reason) => {
                tracing::warn!(file = %file_name, reason = %reason, "skipping malformed migration file");
            }
        }
    }

    Ok(assembler.finish())
}
