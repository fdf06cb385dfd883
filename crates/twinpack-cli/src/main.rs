//! twinpack CLI entry point.
//!
//! Parses arguments, initializes logging, reads the backend selection
//! signals once and dispatches to the command.

use clap::Parser;
use miette::Result;
use twinpack_cli::{cli, commands, error, logger, ui};
use twinpack_resolver::BackendSignals;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    // The only place the process environment selects a backend
    let signals = BackendSignals::from_env();

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, signals).await
        }
        cli::Command::Classify(classify_args) => {
            commands::classify_execute(classify_args, signals).await
        }
        cli::Command::Check(check_args) => commands::check_execute(check_args, signals).await,
    };

    result.map_err(error::cli_error_to_miette)
}
