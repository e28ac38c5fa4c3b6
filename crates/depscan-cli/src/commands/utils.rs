//! Shared helpers for command implementations.

use crate::error::{CliError, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Join a relative path onto `cwd`; absolute paths pass through.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().context("Cannot determine current directory")
}

/// The graph file must exist and be a regular file.
pub fn validate_graph_file(path: &Path) -> Result<()> {
    let metadata = path.metadata().with_path(path)?;

    if !metadata.is_file() {
        return Err(CliError::InvalidArgument(format!(
            "Graph path is not a file: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_join_the_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(Path::new("graph.json"), cwd), PathBuf::from("/work/graph.json"));
        assert_eq!(resolve_path(Path::new("/abs/g.json"), cwd), PathBuf::from("/abs/g.json"));
    }

    #[test]
    fn graph_file_checks() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            validate_graph_file(&temp.path().join("missing.toon")),
            Err(CliError::FileNotFound(_))
        ));
        assert!(matches!(
            validate_graph_file(temp.path()),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
