use std::collections::BTreeSet;

use super::DependencyGraph;
use crate::file_id::FileId;

impl DependencyGraph {
    /// Files that `id` imports (resolved edges only), sorted.
    pub fn dependencies(&self, id: &FileId) -> BTreeSet<FileId> {
        self.files
            .get(id)
            .map(|node| node.resolved_targets().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every resolved edge as `(importer, target)`, deduplicated and sorted.
    pub fn edges(&self) -> Vec<(&FileId, &FileId)> {
        self.files
            .values()
            .flat_map(|node| {
                node.resolved_targets()
                    .into_iter()
                    .map(move |target| (&node.path, target))
            })
            .collect()
    }

    /// Cycles that pass through `id`.
    pub fn cycles_containing(&self, id: &FileId) -> Vec<&[FileId]> {
        self.circular
            .iter()
            .filter(|cycle| cycle.contains(id))
            .map(Vec::as_slice)
            .collect()
    }

    pub fn is_dead(&self, id: &FileId) -> bool {
        self.dead_code.binary_search(id).is_ok()
    }

    /// Look a file up by its full id or, failing that, by a unique path
    /// suffix such as `src/app.ts`.
    pub fn find_file(&self, query: &str) -> Option<&FileId> {
        let exact = FileId::from_canonical(query);
        if let Some((key, _)) = self.files.get_key_value(&exact) {
            return Some(key);
        }

        let suffix = format!("/{}", query.trim_start_matches("./"));
        let mut matches = self
            .files
            .keys()
            .filter(|key| key.as_str().ends_with(&suffix));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}
