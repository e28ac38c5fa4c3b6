//! depscan CLI - dependency graphs for mixed TypeScript, JavaScript, Go and
//! Python repositories.
//!
//! The binary is a thin layer over `depscan-graph`:
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`commands`] - `scan` and `inspect`
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines and summaries on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use depscan_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
