//! Main entry point for rowdelta CLI

use clap::Parser;
use rowdelta::cli::Cli;
use rowdelta::commands::execute_command;

/// Exit status for fatal errors, distinct from "differences found"
const EXIT_FAILURE: i32 = 2;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, verbose raises the level to debug
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match execute_command(&cli) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
