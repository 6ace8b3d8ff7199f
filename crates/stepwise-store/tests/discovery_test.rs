// Integration tests for filesystem discovery

use std::fs;
use std::path::Path;
use stepwise_core::MigrateError;
use stepwise_store::discovery::discover;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write migration file");
}

#[test]
fn test_discover_pairs_up_and_down_scripts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "000001_create_users.up.sql", "CREATE TABLE users (id INTEGER);");
    write(dir.path(), "000001_create_users.down.sql", "DROP TABLE users;");
    write(dir.path(), "000002_add_email.up.sql", "ALTER TABLE users ADD COLUMN email TEXT;");

    let units = discover(dir.path()).unwrap();

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].version().as_str(), "000001");
    assert_eq!(units[0].name(), "create_users");
    assert!(units[0].up_script().is_some());
    assert!(units[0].down_script().is_some());
    assert_eq!(units[1].version().as_str(), "000002");
    assert!(units[1].down_script().is_none());
}

#[test]
fn test_discover_orders_by_version_not_listing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "10_later.up.sql", "SELECT 10;");
    write(dir.path(), "9_earlier.up.sql", "SELECT 9;");
    write(dir.path(), "100_latest.up.sql", "SELECT 100;");

    let versions: Vec<String> = discover(dir.path())
        .unwrap()
        .iter()
        .map(|u| u.version().to_string())
        .collect();

    assert_eq!(versions, vec!["9", "10", "100"]);
}

#[test]
fn test_discover_ignores_noise() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# migrations");
    write(dir.path(), "notes.txt", "not sql");
    write(dir.path(), "seed.sql", "INSERT INTO nowhere VALUES (1);");
    write(dir.path(), "000001_init.up.sql", "SELECT 1;");
    fs::create_dir(dir.path().join("000002_nested.up.sql")).unwrap();

    let units = discover(dir.path()).unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name(), "init");
}

#[test]
fn test_discover_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(discover(dir.path()).unwrap().is_empty());
}

#[test]
fn test_discover_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = discover(&missing).unwrap_err();
    assert!(matches!(err, MigrateError::DirectoryUnreadable { .. }));
}

#[test]
fn test_discover_rejects_duplicate_direction() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "000001_first.up.sql", "SELECT 1;");
    write(dir.path(), "000001_second.up.sql", "SELECT 2;");

    let err = discover(dir.path()).unwrap_err();
    match err {
        MigrateError::DuplicateScript { version, first, second, .. } => {
            assert_eq!(version, "000001");
            assert_eq!(first, "000001_first.up.sql");
            assert_eq!(second, "000001_second.up.sql");
        }
        other => panic!("expected DuplicateScript, got {:?}", other),
    }
}

#[test]
fn test_discover_accepts_dashed_version() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "2024-01-01_init.up.sql", "CREATE TABLE t (id INTEGER);");
    write(dir.path(), "2024-01-01_init.down.sql", "DROP TABLE t;");

    let units = discover(dir.path()).unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].version().as_str(), "2024-01-01");
    assert_eq!(units[0].name(), "init");
    assert!(units[0].up_script().is_some());
}

#[test]
fn test_discover_keeps_file_without_direction_as_empty_unit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "000001_init.up.sql", "SELECT 1;");
    write(dir.path(), "000002_add_col.sql", "ALTER TABLE t ADD COLUMN c TEXT;");

    let units = discover(dir.path()).unwrap();

    assert_eq!(units.len(), 2);
    assert_eq!(units[1].version().as_str(), "000002");
    assert_eq!(units[1].name(), "add_col");
    assert!(units[1].up_script().is_none());
    assert!(units[1].down_script().is_none());
}

#[test]
fn test_discover_unreadable_script_names_file() {
    let dir = TempDir::new().unwrap();
    // Invalid UTF-8 makes the script unreadable as text
    fs::write(dir.path().join("000001_binary.up.sql"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = discover(dir.path()).unwrap_err();
    match err {
        MigrateError::ScriptUnreadable { path, .. } => {
            assert!(path.ends_with("000001_binary.up.sql"), "path was {}", path);
        }
        other => panic!("expected ScriptUnreadable, got {:?}", other),
    }
}
