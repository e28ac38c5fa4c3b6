//! Extension and index-file probing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::language::LanguageFamily;
use crate::runtime::{Runtime, is_regular_file};

/// `base` with `.ext` appended, keeping any existing suffix
/// (`./foo.service` becomes `foo.service.ts`, not `foo.ts`).
pub fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Try `base` itself, then `base.<ext>` for each extension of the family.
pub async fn try_extensions(
    base: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if is_regular_file(runtime, base).await {
        return Some(base.to_path_buf());
    }

    for ext in family.probe_extensions() {
        let candidate = append_extension(base, ext);
        if is_regular_file(runtime, &candidate).await {
            return Some(candidate);
        }
    }

    None
}

/// Try the family's index files inside `dir`.
pub async fn try_index_files(
    dir: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    for index in family.index_files() {
        let candidate = dir.join(index);
        if is_regular_file(runtime, &candidate).await {
            return Some(candidate);
        }
    }
    None
}

/// Extension probing with index-file fallback.
pub async fn resolve_with_extensions(
    candidate: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if let Some(found) = try_extensions(candidate, family, runtime).await {
        return Some(found);
    }
    try_index_files(candidate, family, runtime).await
}
