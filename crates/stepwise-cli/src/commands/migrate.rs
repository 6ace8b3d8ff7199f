//! Migrate command

use clap::Args;
use std::path::{Path, PathBuf};
use stepwise_core::render::render_status_table;
use stepwise_core::types::RunContext;
use stepwise_core::{MigrationObserver, MigrationUnit, NoopObserver, StatusReport};
use stepwise_engine::commands::{ApplyReport, RevertOutcome};
use stepwise_engine::{apply_migrate_command, MigrateAction, MigrateCommand, MigrateOutcome};
use stepwise_store::db;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration action: up, down, or status
    #[arg(long, default_value = "up")]
    pub action: String,

    /// SQLite database file
    #[arg(long, env = "STEPWISE_DATABASE", default_value = ".stepwise/store.db")]
    pub db: PathBuf,

    /// Directory holding <version>_<name>.<up|down>.sql files
    #[arg(long, env = "STEPWISE_MIGRATIONS_DIR", default_value = "migrations")]
    pub dir: PathBuf,

    /// Print the run's report as JSON instead of progress lines and tables
    #[arg(long)]
    pub json: bool,
}

/// Prints one line per unit as the engine reports progress
struct ConsoleObserver;

impl MigrationObserver for ConsoleObserver {
    fn on_skipped(&self, unit: &MigrationUnit) {
        println!(
            "Migration {} ({}) already applied, skipping",
            unit.version(),
            unit.name()
        );
    }

    fn on_applying(&self, unit: &MigrationUnit) {
        println!("Applying migration {} ({})...", unit.version(), unit.name());
    }

    fn on_applied(&self, unit: &MigrationUnit) {
        println!("Migration {} applied successfully", unit.version());
    }

    fn on_reverting(&self, unit: &MigrationUnit) {
        println!("Rolling back migration {} ({})...", unit.version(), unit.name());
    }

    fn on_reverted(&self, unit: &MigrationUnit) {
        println!("Migration {} rolled back successfully", unit.version());
    }

    fn on_nothing_to_revert(&self) {
        println!("No migrations to roll back");
    }
}

pub fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Reject a bad action before touching the database
    let action: MigrateAction = args.action.parse()?;

    if let Some(parent) = args.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut conn = db::open(&args.db)?;
    db::configure(&conn)?;
    db::ping(&conn)?;

    let ctx = RunContext::new();
    let cmd = MigrateCommand {
        action,
        migrations_dir: args.dir.clone(),
    };

    // Progress lines would corrupt a JSON document on stdout
    let observer: &dyn MigrationObserver = if args.json {
        &NoopObserver
    } else {
        &ConsoleObserver
    };
    let outcome = apply_migrate_command(cmd, &mut conn, &ctx, observer)?;

    if args.json {
        return print_json(&outcome);
    }
    match outcome {
        MigrateOutcome::Up(report) => print_up(&report),
        MigrateOutcome::Down(outcome) => print_down(&outcome),
        MigrateOutcome::Status(report) => print_status(&report, &args.dir),
    }

    Ok(())
}

fn print_json(outcome: &MigrateOutcome) -> Result<(), Box<dyn std::error::Error>> {
    let json = match outcome {
        MigrateOutcome::Up(report) => serde_json::to_string_pretty(report)?,
        MigrateOutcome::Down(outcome) => serde_json::to_string_pretty(outcome)?,
        MigrateOutcome::Status(report) => serde_json::to_string_pretty(report)?,
    };
    println!("{}", json);
    Ok(())
}

fn print_up(report: &ApplyReport) {
    if report.applied.is_empty() {
        println!("No pending migrations");
    } else {
        println!("Migrations applied successfully!");
    }
}

fn print_down(outcome: &RevertOutcome) {
    if let RevertOutcome::Reverted(_) = outcome {
        println!("Migration rolled back successfully!");
    }
}

fn print_status(report: &StatusReport, dir: &Path) {
    println!("Migrations directory: {}", dir.display());
    print!("{}", render_status_table(report));
}
