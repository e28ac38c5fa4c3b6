use std::collections::BTreeMap;

use serde::Serialize;

use super::DependencyGraph;
use crate::language::Language;

/// Aggregate counts over a finished graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub file_count: usize,
    pub import_count: usize,
    pub resolved_import_count: usize,
    pub export_count: usize,
    pub cycle_count: usize,
    pub dead_code_count: usize,
    /// Files per language, ordered by language.
    pub languages: BTreeMap<Language, usize>,
}

impl GraphStatistics {
    /// Imports that did not map to a file in the graph.
    pub fn unresolved_import_count(&self) -> usize {
        self.import_count - self.resolved_import_count
    }
}

impl DependencyGraph {
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            file_count: self.files.len(),
            cycle_count: self.circular.len(),
            dead_code_count: self.dead_code.len(),
            ..GraphStatistics::default()
        };

        for node in self.files.values() {
            *stats.languages.entry(node.language).or_insert(0) += 1;
            stats.import_count += node.imports.len();
            stats.resolved_import_count +=
                node.imports.iter().filter(|imp| imp.is_resolved()).count();
            stats.export_count += node.exports.len();
        }

        stats
    }
}
