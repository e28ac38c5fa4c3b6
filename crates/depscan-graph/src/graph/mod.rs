//! The file dependency graph and its whole-graph passes.
//!
//! `DependencyGraph` is a plain value owned by one scan. Methods are grouped
//! by concern across the submodules of this directory, each adding an
//! `impl DependencyGraph` block.

mod construction;
mod queries;
mod reverse_index;
mod serialization;
mod statistics;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file_id::FileId;
use crate::file_node::FileNode;

pub use statistics::GraphStatistics;

/// Files, their edges, and the results of cycle and dead-code detection.
///
/// `files` is ordered by path, which makes every traversal and every
/// serialized form deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DependencyGraph {
    pub files: BTreeMap<FileId, FileNode>,
    /// Each entry is one import loop, without repeating the first node at
    /// the end.
    #[serde(default)]
    pub circular: Vec<Vec<FileId>>,
    #[serde(default)]
    pub dead_code: Vec<FileId>,
    pub last_updated: DateTime<Utc>,
}

impl DependencyGraph {
    /// An empty graph stamped with the current time.
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    pub fn with_timestamp(last_updated: DateTime<Utc>) -> Self {
        Self {
            files: BTreeMap::new(),
            circular: Vec::new(),
            dead_code: Vec::new(),
            last_updated,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: &FileId) -> Option<&FileNode> {
        self.files.get(id)
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.files.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.files.values()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
