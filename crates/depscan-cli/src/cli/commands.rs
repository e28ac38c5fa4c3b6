use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::{FormatArg, LanguageArg};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory tree and write its dependency graph
    ///
    /// Walks the tree, parses every supported source file, resolves imports,
    /// and writes the graph with its cycles and dead code.
    Scan(ScanArgs),

    /// Query a graph file written by `depscan scan`
    ///
    /// Without a FILE argument prints the graph summary, cycles and dead
    /// code. With FILE prints that file's imports, importers and cycles.
    Inspect(InspectArgs),
}

/// Arguments for the scan command
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Where to write the graph
    ///
    /// Defaults to dep-graph.toon inside the scanned directory.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (guessed from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Extra directory names to skip (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Do not skip node_modules, .git, build outputs and the other defaults
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Module name for module-qualified imports (defaults to go.mod's module)
    #[arg(short, long, value_name = "NAME")]
    pub module: Option<String>,

    /// Only scan these languages (repeatable)
    #[arg(short, long = "language", value_enum, value_name = "LANG")]
    pub language: Vec<LanguageArg>,

    /// Maximum number of files parsed at once
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Path to a config file (defaults to depscan.config.json in PATH)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Graph file written by `depscan scan`
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// File to describe: a full path or a unique suffix such as src/app.ts
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Print JSON to stdout instead of text
    #[arg(long)]
    pub json: bool,
}
