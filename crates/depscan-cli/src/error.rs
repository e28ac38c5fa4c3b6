//! Error types for the depscan CLI.
//!
//! `CliError` is what commands return. Library failures convert into it
//! through `#[from]`, and every user-facing variant ends with a hint.
//!
//! ```rust,no_run
//! use depscan_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn size(path: &Path) -> Result<u64> {
//!     let metadata = path.metadata().with_path(path)?;
//!     Ok(metadata.len())
//! }
//! ```

mod miette;

pub use self::miette::{cli_error_to_miette, scan_error_to_miette};

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scan itself failed (unreadable root, bad options, worker crash).
    #[error("Scan failed: {0}")]
    Scan(#[from] depscan_graph::ScanError),

    /// Writing or reading a graph file failed.
    #[error("{0}")]
    Serialization(#[from] depscan_graph::SerializationError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Errors from loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create a depscan.config.json file or drop --config", .0.display())]
    NotFound(PathBuf),

    /// Figment could not merge or extract the layered configuration.
    #[error("Could not load configuration: {0}\n\nHint: Check depscan.config.json and DEPSCAN_* variables for wrong field names or types")]
    Load(String),

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to any error that converts into [`CliError`].
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint line.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
