//! Native Runtime Implementation
//!
//! Wraps `std::fs` behind the [`Runtime`] trait. Blocking calls run on
//! tokio's blocking pool via `spawn_blocking` so parse workers never stall
//! the async executor while waiting on disk.

// NativeRuntime is the one place allowed to call std::fs directly
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::Path;
use tokio::task;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> RuntimeError {
    if err.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {} {}: {}", action, path.display(), err))
    }
}

fn join_error(err: task::JoinError) -> RuntimeError {
    RuntimeError::Other(format!("Task join error: {}", err))
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || std::fs::read(&path).map_err(|e| io_error("read", &path, e)))
            .await
            .map_err(join_error)?
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let path = path.to_path_buf();
        let content = content.to_vec();

        task::spawn_blocking(move || {
            std::fs::write(&path, content).map_err(|e| io_error("write", &path, e))
        })
        .await
        .map_err(join_error)?
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let metadata =
                std::fs::metadata(&path).map_err(|e| io_error("get metadata for", &path, e))?;

            Ok(FileMetadata {
                size: metadata.len(),
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
            })
        })
        .await
        .map_err(join_error)?
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let result = if recursive {
                std::fs::create_dir_all(&path)
            } else {
                std::fs::create_dir(&path)
            };
            result.map_err(|e| io_error("create directory", &path, e))
        })
        .await
        .map_err(join_error)?
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let entries =
                std::fs::read_dir(&path).map_err(|e| io_error("read directory", &path, e))?;

            let mut result = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| {
                    RuntimeError::Io(format!("Failed to read directory entry: {}", e))
                })?;
                if let Some(name) = entry.file_name().to_str() {
                    result.push(name.to_string());
                }
            }
            Ok(result)
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_missing_file_reports_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.ts");

        let err = NativeRuntime.read_file(&missing).await.unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn metadata_distinguishes_files_and_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.go"), "package a").unwrap();

        let file = NativeRuntime.metadata(&temp.path().join("a.go")).await.unwrap();
        assert!(file.is_file);
        assert_eq!(file.size, 9);

        let dir = NativeRuntime.metadata(temp.path()).await.unwrap();
        assert!(dir.is_dir);
    }

    #[tokio::test]
    async fn create_dir_then_write_and_list() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("out/graphs");

        NativeRuntime.create_dir(&nested, true).await.unwrap();
        NativeRuntime
            .write_file(&nested.join("g.json"), b"{}")
            .await
            .unwrap();

        let names = NativeRuntime.read_dir(&nested).await.unwrap();
        assert_eq!(names, vec!["g.json".to_string()]);
    }
}
