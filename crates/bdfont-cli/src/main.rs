//! bdfont CLI
//!
//! Inspect BDF fonts and render text with them.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.command);

    let result = match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Batch(args) => commands::batch::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

/// RUST_LOG wins; otherwise --verbose shows debug and --quiet only errors
fn init_logging(command: &Commands) {
    let (quiet, verbose) = command.verbosity();
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
