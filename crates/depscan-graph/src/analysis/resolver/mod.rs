//! Import resolution.
//!
//! Maps a raw import string plus the importing file to a concrete file:
//!
//! 1. Relative or root-relative paths, with extension and index probing
//! 2. Module-qualified paths (`<module>/pkg`, `<module>.pkg`)
//! 3. Anything else is external or unresolved, never an error

mod algorithm;
mod extensions;
mod module_context;

pub use algorithm::{is_path_like, python_relative_path};
pub use extensions::{append_extension, resolve_with_extensions, try_extensions, try_index_files};
pub use module_context::{ModuleContext, parse_go_mod};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::analysis::config::ResolveResult;
use crate::file_id::FileId;
use crate::graph::DependencyGraph;
use crate::language::{Language, LanguageFamily};
use crate::runtime::Runtime;

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: usize,
    pub external: usize,
    pub unresolved: usize,
    /// Resolved to an existing file that is not part of the graph.
    pub outside_graph: usize,
}

/// Resolver for one scan root.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    root: PathBuf,
    module: Option<ModuleContext>,
}

impl ImportResolver {
    pub fn new(root: impl Into<PathBuf>, module: Option<ModuleContext>) -> Self {
        Self {
            root: root.into(),
            module,
        }
    }

    /// Resolve one specifier written in `from`.
    ///
    /// The result may name a file that is not in the graph;
    /// [`resolve_graph`](Self::resolve_graph) filters those out.
    pub async fn resolve(
        &self,
        from: &FileId,
        raw: &str,
        language: Language,
        runtime: &dyn Runtime,
    ) -> ResolveResult {
        let family = language.family();

        if is_path_like(raw, family) {
            return match algorithm::resolve_relative(raw, from.as_path(), &self.root, family, runtime)
                .await
            {
                Some(path) => ResolveResult::Resolved(FileId::new(path)),
                None => ResolveResult::Unresolved(raw.to_string()),
            };
        }

        if let Some(module) = &self.module {
            if module.strip(raw, family.module_separator()).is_some() {
                return match algorithm::resolve_module_qualified(
                    raw, module, &self.root, family, runtime,
                )
                .await
                {
                    Some(path) => ResolveResult::Resolved(FileId::new(path)),
                    None => ResolveResult::Unresolved(raw.to_string()),
                };
            }
        }

        ResolveResult::External(raw.to_string())
    }

    /// Fill `resolved_path` for every import in the graph.
    ///
    /// Only targets that are graph keys are recorded. Results are cached per
    /// directory, family and specifier, since sibling files tend to import
    /// the same things.
    pub async fn resolve_graph(
        &self,
        graph: &mut DependencyGraph,
        runtime: &dyn Runtime,
    ) -> ResolutionStats {
        let known: BTreeSet<FileId> = graph.files.keys().cloned().collect();
        let mut cache: FxHashMap<(PathBuf, LanguageFamily, String), ResolveResult> =
            FxHashMap::default();
        let mut stats = ResolutionStats::default();

        for node in graph.files.values_mut() {
            let dir = node.path.as_path().parent().map(Path::to_path_buf).unwrap_or_default();

            for import in &mut node.imports {
                let key = (dir.clone(), node.language.family(), import.raw_path.clone());
                let result = match cache.get(&key) {
                    Some(hit) => hit.clone(),
                    None => {
                        let result = self
                            .resolve(&node.path, &import.raw_path, node.language, runtime)
                            .await;
                        cache.insert(key, result.clone());
                        result
                    }
                };

                import.resolved_path = None;
                match result {
                    ResolveResult::Resolved(target) if known.contains(&target) => {
                        stats.resolved += 1;
                        import.resolved_path = Some(target);
                    }
                    ResolveResult::Resolved(target) => {
                        stats.outside_graph += 1;
                        debug!(
                            from = %node.path,
                            raw = %import.raw_path,
                            target = %target,
                            "import target is not a scanned file"
                        );
                    }
                    ResolveResult::External(_) => stats.external += 1,
                    ResolveResult::Unresolved(_) => {
                        stats.unresolved += 1;
                        debug!(from = %node.path, raw = %import.raw_path, "unresolved import");
                    }
                }
            }
        }

        stats
    }
}
