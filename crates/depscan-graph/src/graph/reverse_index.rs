use std::collections::BTreeSet;

use super::DependencyGraph;
use crate::file_id::FileId;

impl DependencyGraph {
    /// Populate every node's `imported_by` from the resolved imports.
    ///
    /// One entry per importer regardless of how many statements reference
    /// the target. Existing entries are kept, so the pass is append-only.
    pub fn build_reverse_index(&mut self) {
        let edges: Vec<(FileId, FileId)> = self
            .files
            .values()
            .flat_map(|node| {
                node.resolved_targets()
                    .into_iter()
                    .map(move |target| (node.path.clone(), target.clone()))
            })
            .collect();

        for (importer, target) in edges {
            if let Some(node) = self.files.get_mut(&target) {
                node.imported_by.insert(importer);
            }
        }
    }

    /// Files that import `id`, sorted.
    pub fn importers_of(&self, id: &FileId) -> BTreeSet<FileId> {
        self.files
            .get(id)
            .map(|node| node.imported_by.clone())
            .unwrap_or_default()
    }
}
