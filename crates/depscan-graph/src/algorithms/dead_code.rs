use crate::file_id::FileId;
use crate::graph::DependencyGraph;

/// Files with no importers, in path order.
///
/// Entry points (`main.go`, `index.ts`, scripts) are reported like any other
/// file; callers that know their entry points filter them out.
pub fn find_dead_code(graph: &DependencyGraph) -> Vec<FileId> {
    graph
        .files
        .values()
        .filter(|node| node.imported_by.is_empty())
        .map(|node| node.path.clone())
        .collect()
}
