//! stepwise CLI
//!
//! Command-line interface for the stepwise migration engine

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "stepwise")]
#[command(about = "stepwise - Versioned SQL schema migrations", long_about = None)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, global = true, env = "STEPWISE_LOG_FORMAT", default_value = "pretty")]
    log_format: commands::LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply, revert or inspect migrations
    Migrate(commands::migrate::MigrateArgs),
}

fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    commands::init_logging(cli.log_format);

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
