//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::analysis::config::ScanConfig;
use crate::error::ScanError;
use crate::language::Language;

/// A file the scanner will parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
}

/// Walk `root` and return every file of an enabled language, ordered by
/// file name within each directory.
///
/// Directories whose name is in the exclusion set are pruned at any depth,
/// except the root itself. Symlinks are not followed.
pub fn discover(root: &Path, config: &ScanConfig) -> Result<Vec<SourceFile>, ScanError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, config));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            ScanError::filesystem(path, e)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(language) = Language::from_path(entry.path()) else {
            continue;
        };
        if !config.languages.contains(&language) {
            continue;
        }

        files.push(SourceFile {
            path: entry.into_path(),
            language,
        });
    }

    debug!(root = %root.display(), count = files.len(), "discovered source files");
    Ok(files)
}

fn is_pruned(entry: &DirEntry, config: &ScanConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded(name))
}
