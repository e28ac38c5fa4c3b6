//! Command-line interface definition.
//!
//! - `depscan scan [PATH]` - build the dependency graph of a tree and write it
//! - `depscan inspect <GRAPH> [FILE]` - query a graph written by `scan`

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{Command, InspectArgs, ScanArgs};
pub use enums::*;

/// depscan - dependency graphs for mixed-language repositories
#[derive(Parser, Debug)]
#[command(
    name = "depscan",
    version,
    about = "Cross-language dependency graphs, import cycles and dead code",
    long_about = "depscan parses TypeScript, JavaScript, Go and Python sources, resolves\n\
                  their imports to files, and reports import cycles and files nothing imports."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
