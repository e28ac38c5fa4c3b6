//! Test utilities for depscan-graph.
//!
//! `TestRuntime` wraps `std::fs` synchronously and pins a working directory:
//! relative paths resolve against it, so tests that run against a
//! `tempfile::TempDir` stay independent of the process cwd.

// Test utilities are allowed to use std::fs since they only run on native platforms
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Simple test runtime that wraps std::fs for native tests.
///
/// ```rust,ignore
/// use depscan_graph::test_utils::TestRuntime;
/// use depscan_graph::Runtime;
/// use tempfile::TempDir;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let temp = TempDir::new().unwrap();
/// let runtime = TestRuntime::new(temp.path().to_path_buf());
/// std::fs::write(temp.path().join("a.py"), b"x = 1").unwrap();
///
/// let content = runtime.read_file(&temp.path().join("a.py")).await.unwrap();
/// assert_eq!(content, b"x = 1");
/// # }
/// ```
#[derive(Debug)]
pub struct TestRuntime {
    cwd: PathBuf,
}

impl TestRuntime {
    /// Create a new test runtime with the specified working directory.
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }

    fn at(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = self.at(path);
        std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.clone())
            } else {
                RuntimeError::Io(e.to_string())
            }
        })
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        std::fs::write(self.at(path), content).map_err(|e| RuntimeError::Io(e.to_string()))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata =
            std::fs::metadata(self.at(path)).map_err(|e| RuntimeError::Io(e.to_string()))?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_file: metadata.is_file(),
            is_dir: metadata.is_dir(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.at(path).exists()
    }

    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let path = self.at(path);
        if recursive {
            std::fs::create_dir_all(&path).map_err(|e| RuntimeError::Io(e.to_string()))
        } else {
            std::fs::create_dir(&path).map_err(|e| RuntimeError::Io(e.to_string()))
        }
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let entries: Vec<String> = std::fs::read_dir(self.at(path))
            .map_err(|e| RuntimeError::Io(e.to_string()))?
            .filter_map(|entry| {
                entry
                    .ok()
                    .and_then(|e| e.file_name().to_str().map(String::from))
            })
            .collect();
        Ok(entries)
    }
}

/// Create a project tree under `root` from `(relative path, content)` pairs.
///
/// Parent directories are created as needed.
pub fn create_test_project(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("failed to create {}: {}", parent.display(), e);
            });
        }
        std::fs::write(&path, content).unwrap_or_else(|e| {
            panic!("failed to write {}: {}", path.display(), e);
        });
    }
}
