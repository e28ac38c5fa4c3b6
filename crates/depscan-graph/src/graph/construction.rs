use tracing::debug;

use super::DependencyGraph;
use crate::algorithms::{find_cycles, find_dead_code};
use crate::file_node::FileNode;

impl DependencyGraph {
    /// Insert a parsed file, keyed by its path.
    ///
    /// Returns the node previously stored under the same key, if any.
    pub fn insert_file(&mut self, node: FileNode) -> Option<FileNode> {
        self.files.insert(node.path.clone(), node)
    }

    /// Clear resolutions that point outside the file set.
    ///
    /// Returns the number of imports that were downgraded to unresolved.
    pub fn drop_dangling_resolutions(&mut self) -> usize {
        let known: std::collections::BTreeSet<_> = self.files.keys().cloned().collect();
        let mut dropped = 0;
        for node in self.files.values_mut() {
            for import in &mut node.imports {
                let dangling = import
                    .resolved_path
                    .as_ref()
                    .is_some_and(|target| !known.contains(target));
                if dangling {
                    import.resolved_path = None;
                    dropped += 1;
                }
            }
        }
        dropped
    }

    /// Run the post-resolution passes in order: reverse index, cycle
    /// detection, dead-code detection.
    ///
    /// Must be called once, after every import has been resolved.
    pub fn finalize(&mut self) {
        let dropped = self.drop_dangling_resolutions();
        if dropped > 0 {
            debug!(dropped, "cleared resolutions to files outside the graph");
        }
        self.build_reverse_index();
        self.circular = find_cycles(self);
        self.dead_code = find_dead_code(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_helpers::{edge_graph, id};

    #[test]
    fn finalize_fills_every_derived_field() {
        let mut graph = edge_graph(&[("a", "b"), ("b", "a"), ("c", "a")]);
        graph.finalize();

        assert_eq!(graph.circular, vec![vec![id("a"), id("b")]]);
        assert_eq!(graph.dead_code, vec![id("c")]);
        assert!(graph.get(&id("a")).unwrap().imported_by.contains(&id("c")));
    }

    #[test]
    fn dangling_resolutions_are_cleared() {
        let mut graph = edge_graph(&[("a", "b")]);
        graph.files.remove(&id("b"));

        assert_eq!(graph.drop_dangling_resolutions(), 1);
        let node = graph.get(&id("a")).unwrap();
        assert!(!node.imports[0].is_resolved());
    }
}
