use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::export::Export;
use crate::file_id::FileId;
use crate::import::Import;
use crate::language::Language;

/// A parsed source file and its edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileNode {
    /// Equal to the node's key in the graph.
    pub path: FileId,
    pub language: Language,
    /// In source order.
    #[serde(default)]
    pub imports: Vec<Import>,
    /// In source order.
    #[serde(default)]
    pub exports: Vec<Export>,
    /// Files with at least one resolved import of this file. Populated only
    /// by the reverse-index pass.
    #[serde(default)]
    pub imported_by: BTreeSet<FileId>,
}

impl FileNode {
    pub fn new(path: FileId, language: Language) -> Self {
        Self {
            path,
            language,
            imports: Vec::new(),
            exports: Vec::new(),
            imported_by: BTreeSet::new(),
        }
    }

    pub fn with_imports(mut self, imports: Vec<Import>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_exports(mut self, exports: Vec<Export>) -> Self {
        self.exports = exports;
        self
    }

    /// Distinct resolved targets, sorted.
    pub fn resolved_targets(&self) -> BTreeSet<&FileId> {
        self.imports
            .iter()
            .filter_map(|imp| imp.resolved_path.as_ref())
            .collect()
    }

    /// Imports whose target is `target`.
    pub fn imports_from(&self, target: &FileId) -> Vec<&Import> {
        self.imports
            .iter()
            .filter(|imp| imp.resolved_path.as_ref() == Some(target))
            .collect()
    }

    pub fn unresolved_imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter(|imp| !imp.is_resolved())
    }
}
