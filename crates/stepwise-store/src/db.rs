//! Database connection management
//!
//! Provides utilities for opening and checking SQLite connections

use crate::errors::{connection_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(connection_error)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(connection_error)
}

/// Configure a connection for migration runs
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(connection_error)?;

    Ok(())
}

/// Check that the connection answers a trivial query
pub fn ping(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map_err(connection_error)?;
    Ok(())
}
