//! Conversion from CLI errors to miette reports.

use crate::error::CliError;
use depscan_graph::ScanError;
use miette::Report;

/// Convert a [`CliError`] into the report printed by `main`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Scan(e) => scan_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Serialization(e) => miette::miette!(
            "{}\n\nHint: Graph files are written by 'depscan scan' in json or compact format",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

pub fn scan_error_to_miette(err: ScanError) -> Report {
    match err {
        ScanError::FileSystem { path, message } => miette::miette!(
            "Cannot read {}: {}\n\nHint: Check that the path exists and is readable",
            path.display(),
            message
        ),
        ScanError::InvalidConfig(reason) => miette::miette!(
            "Invalid scan options: {}\n\nHint: Check --jobs, --language and --module",
            reason
        ),
        other => miette::miette!("{}", other),
    }
}
