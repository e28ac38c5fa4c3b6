//! # depscan-graph
//!
//! Cross-language file dependency graphs for mixed TypeScript, JavaScript, Go
//! and Python repositories.
//!
//! ## Overview
//!
//! A scan walks a directory tree, parses every supported source file with
//! tree-sitter, normalizes each language's import and export syntax into one
//! record shape, resolves raw import strings to concrete files, and then runs
//! whole-graph passes over the result:
//!
//! - **Reverse index**: who imports each file
//! - **Cycles**: strongly connected components of the resolved import graph
//! - **Dead code**: files nothing imports
//!
//! ## Architecture
//!
//! ```text
//!   walk ──▶ parse (bounded, parallel) ──▶ insert (single funnel)
//!                                              │
//!                                              ▼
//!   serialize ◀── dead code ◀── cycles ◀── reverse index ◀── resolve
//! ```
//!
//! Every stage after insertion is a sequential pass over the frozen file set,
//! so two scans of the same tree produce identical graphs apart from the
//! timestamp.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use depscan_graph::{NativeRuntime, ScanConfig, Scanner};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), depscan_graph::ScanError> {
//! let config = ScanConfig::new("./my-project");
//! let report = Scanner::new(config).scan(Arc::new(NativeRuntime)).await?;
//!
//! for cycle in &report.graph.circular {
//!     println!("cycle: {cycle:?}");
//! }
//! println!("{} unreferenced files", report.graph.dead_code.len());
//! # Ok(())
//! # }
//! ```

pub mod runtime;

pub mod analysis;

pub mod algorithms;
pub mod error;
pub mod export;
pub mod file_id;
pub mod file_node;
pub mod graph;
pub mod import;
pub mod language;
pub mod output;

pub use algorithms::{find_cycles, find_dead_code};
pub use analysis::{
    DEFAULT_EXCLUDES, ImportResolver, ModuleContext, ResolutionStats, ResolveResult, ScanConfig,
    ScanReport, Scanner, extract, parse_source,
};
pub use error::{ParseError, ScanError, SerializationError};
pub use export::{Export, ExportKind};
pub use file_id::FileId;
pub use file_node::FileNode;
pub use graph::{DependencyGraph, GraphStatistics};
pub use import::Import;
pub use language::Language;
pub use output::{DEFAULT_OUTPUT, OutputFormat, read_graph, write_graph};

pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

pub use runtime::native::NativeRuntime;

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils::TestRuntime;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    pub use super::runtime::test_utils::*;
}

#[cfg(test)]
mod tests;
