use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

/// Canonical path of a file in the graph.
///
/// A `FileId` is an absolute, lexically cleaned path stored as a string so
/// that ordering is plain lexicographic ordering. Two imports that reach the
/// same file through different relative spellings produce equal ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Build an id from a path, removing `.` and `..` components.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let cleaned = path.as_ref().to_path_buf().clean();
        Self(cleaned.to_string_lossy().into_owned())
    }

    /// Wrap an already-canonical string without cleaning it.
    ///
    /// Used when reading serialized graphs back, where keys were written by
    /// [`FileId::new`].
    pub fn from_canonical(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for FileId {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl From<&Path> for FileId {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileId {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_dot_segments() {
        let id = FileId::new("/p/src/../lib/./a.ts");
        assert_eq!(id.as_str(), "/p/lib/a.ts");
    }

    #[test]
    fn equal_paths_give_equal_ids() {
        assert_eq!(FileId::new("/p/a/../b.go"), FileId::new("/p/b.go"));
    }

    #[test]
    fn orders_lexicographically() {
        let mut ids = vec![
            FileId::new("/p/c.ts"),
            FileId::new("/p/a.ts"),
            FileId::new("/p/b/index.ts"),
        ];
        ids.sort();
        let names: Vec<_> = ids.iter().map(FileId::as_str).collect();
        assert_eq!(names, vec!["/p/a.ts", "/p/b/index.ts", "/p/c.ts"]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FileId::new("/p/a.py");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"/p/a.py\"");
    }
}
