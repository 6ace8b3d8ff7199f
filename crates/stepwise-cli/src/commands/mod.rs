//! Subcommand handlers

use clap::ValueEnum;
use stepwise_core::logging_facility::{self, Profile};

pub mod migrate;

/// How log events are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

pub fn init_logging(format: LogFormat) {
    let profile = match format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    };
    logging_facility::init(profile);
}
