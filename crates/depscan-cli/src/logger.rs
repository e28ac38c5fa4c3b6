//! Logging setup for the depscan CLI.
//!
//! Library crates log through `tracing`; this module installs the one
//! subscriber that prints those events.
//!
//! ```rust,no_run
//! use depscan_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("starting scan");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "depscan=debug,depscan_graph=debug,depscan_cli=debug";
const QUIET_FILTER: &str = "depscan=error,depscan_graph=error,depscan_cli=error";
const DEFAULT_FILTER: &str = "depscan=info,depscan_graph=info,depscan_cli=info";

/// Filter for the given flags.
///
/// Order of precedence:
/// 1. `--verbose`: debug for depscan crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for depscan crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(build_filter(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
