//! stepwise Store - SQLite persistence and filesystem discovery
//!
//! Provides:
//! - Connection opening, configuration and ping
//! - The `schema_migrations` ledger
//! - Single-unit transactional apply and revert
//! - Discovery of migration scripts from a directory

pub mod db;
pub mod discovery;
pub mod errors;
pub mod ledger;
pub mod migrations;

// Re-export key types
pub use errors::Result;
