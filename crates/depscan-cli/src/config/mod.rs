//! Layered configuration for `depscan scan`.
//!
//! Priority, lowest first: built-in defaults, `depscan.config.json` (or
//! `--config`), `DEPSCAN_*` environment variables, command-line flags.

mod defaults;
mod loading;
mod validation;

use depscan_graph::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{CliOverrides, ENV_PREFIX};

/// Scan settings after all layers are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DepscanConfig {
    /// Directory to scan
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Graph file to write (defaults to `<root>/dep-graph.toon`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Output format; guessed from the output extension when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Extra directory names to skip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Drop the built-in exclusion list
    #[serde(default)]
    pub no_default_excludes: bool,

    /// Module name for module-qualified imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Languages to scan; all when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    /// Parse concurrency; available parallelism when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for DepscanConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: None,
            format: None,
            exclude: Vec::new(),
            no_default_excludes: false,
            module: None,
            languages: None,
            jobs: None,
            max_file_size: default_max_file_size(),
        }
    }
}

impl DepscanConfig {
    /// Where the graph is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join(depscan_graph::DEFAULT_OUTPUT))
    }

    /// Explicit format, else JSON for `.json` outputs and compact otherwise.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(self.output_path()))
    }
}
