//! Error taxonomy for scans.
//!
//! - [`ScanError`] aborts a scan (filesystem failures, bad configuration).
//! - [`ParseError`] is per-file and recoverable; the scanner records it and
//!   drops the file.
//! - [`SerializationError`] aborts output (encode, decode or write failure).
//!
//! An import that cannot be resolved is not an error at all.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::runtime::RuntimeError;

/// Fatal scan failure.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root or a file inside it could not be read or walked.
    #[error("Filesystem error at {}: {message}", .path.display())]
    FileSystem { path: PathBuf, message: String },

    /// Invalid scan configuration.
    #[error("Invalid scan configuration: {0}")]
    InvalidConfig(String),

    /// A parse worker panicked or was cancelled.
    #[error("Parse task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl ScanError {
    pub fn filesystem(path: impl AsRef<Path>, err: impl fmt::Display) -> Self {
        Self::FileSystem {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// A single file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse {}: {reason}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub reason: String,
}

impl ParseError {
    pub fn new(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Encoding, decoding or writing a graph failed.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A compact-format document is malformed.
    #[error("Malformed compact graph at line {line}: {reason}")]
    Compact { line: usize, reason: String },

    #[error("Failed to write graph to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Failed to read graph from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

impl SerializationError {
    pub fn compact(line: usize, reason: impl Into<String>) -> Self {
        Self::Compact {
            line,
            reason: reason.into(),
        }
    }
}
