//! depscan - cross-language dependency graphs from the command line.
//!
//! Parses arguments, sets up logging, and dispatches to a command.

use clap::Parser;
use depscan_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Scan(scan_args) => commands::scan_execute(scan_args).await,
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
