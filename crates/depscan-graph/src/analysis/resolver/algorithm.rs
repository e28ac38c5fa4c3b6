//! Resolution rules, applied in order: relative/root-relative paths, then
//! module-qualified paths.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::extensions::{append_extension, resolve_with_extensions};
use super::module_context::ModuleContext;
use crate::language::{Language, LanguageFamily};
use crate::runtime::{Runtime, is_directory, is_regular_file};

/// Whether `raw` is a path resolved against the importing file's directory.
pub fn is_path_like(raw: &str, family: LanguageFamily) -> bool {
    match family {
        LanguageFamily::Python => raw.starts_with('.'),
        LanguageFamily::EcmaScript | LanguageFamily::Go => {
            raw == "."
                || raw == ".."
                || raw.starts_with("./")
                || raw.starts_with("../")
                || raw.starts_with('/')
        }
    }
}

/// Convert Python relative notation to a relative path.
///
/// One leading dot is the current package, each extra dot one parent;
/// remaining dots separate path components.
pub fn python_relative_path(raw: &str) -> PathBuf {
    let module = raw.trim_start_matches('.');
    let dots = raw.len() - module.len();

    let mut path = PathBuf::from(".");
    for _ in 1..dots {
        path.push("..");
    }
    for part in module.split('.').filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path
}

/// Rule 1: relative (`./`, `../`, Python leading dots) or root-relative
/// (`/`) specifiers. Both join to the importing file's directory.
pub async fn resolve_relative(
    raw: &str,
    from: &Path,
    root: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let dir = from.parent().unwrap_or(root);

    let candidate = match family {
        LanguageFamily::Python => dir.join(python_relative_path(raw)),
        _ => dir.join(raw.trim_start_matches('/')),
    }
    .clean();

    resolve_with_extensions(&candidate, family, runtime).await
}

/// Rule 2: specifiers qualified by the module name.
///
/// The module name maps to the root. A directory target resolves to its
/// first source file of the owning family by name; anything else gets the
/// family's extensions appended.
pub async fn resolve_module_qualified(
    raw: &str,
    module: &ModuleContext,
    root: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let rest = module.strip(raw, family.module_separator())?;
    let relative = match family {
        LanguageFamily::Python => rest.replace('.', "/"),
        _ => rest.to_string(),
    };
    let target = if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative).clean()
    };

    if is_directory(runtime, &target).await {
        return first_source_file(&target, family, runtime).await;
    }

    for ext in family.probe_extensions() {
        let candidate = append_extension(&target, ext);
        if is_regular_file(runtime, &candidate).await {
            return Some(candidate);
        }
    }

    None
}

async fn first_source_file(
    dir: &Path,
    family: LanguageFamily,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let mut entries = runtime.read_dir(dir).await.ok()?;
    entries.sort();

    for name in entries {
        let owned = Language::from_path(&name).is_some_and(|lang| lang.family() == family);
        if !owned {
            continue;
        }
        let candidate = dir.join(&name);
        if is_regular_file(runtime, &candidate).await {
            return Some(candidate);
        }
    }

    None
}
