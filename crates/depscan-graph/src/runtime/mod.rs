//! Filesystem abstraction used by the scanner and the import resolver.
//!
//! Everything that touches file contents or metadata goes through the
//! [`Runtime`] trait so the resolver can be exercised against a temporary
//! directory in tests and against the native filesystem in the CLI.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Platform runtime trait.
///
/// Implementations must be cheap to share behind an `Arc`: parse workers
/// each hold a clone of the same runtime.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Write a file to the filesystem
    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory
    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    /// List the entry names of a directory
    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;
}

/// Returns true when `path` exists and is a regular file.
///
/// Metadata failures count as "not a file": the resolver treats an
/// unreadable candidate the same as a missing one.
pub async fn is_regular_file(runtime: &dyn Runtime, path: &Path) -> bool {
    if !runtime.exists(path) {
        return false;
    }
    matches!(runtime.metadata(path).await, Ok(meta) if meta.is_file)
}

/// Returns true when `path` exists and is a directory.
pub async fn is_directory(runtime: &dyn Runtime, path: &Path) -> bool {
    if !runtime.exists(path) {
        return false;
    }
    matches!(runtime.metadata(path).await, Ok(meta) if meta.is_dir)
}
