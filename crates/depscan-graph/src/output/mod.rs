//! Graph serialization: pretty JSON and the compact line format.

mod compact;

pub use compact::{parse_compact, to_compact};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SerializationError;
use crate::graph::DependencyGraph;
use crate::runtime::Runtime;

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT: &str = "dep-graph.toon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Compact,
}

impl OutputFormat {
    /// JSON for `.json` paths, compact for everything else.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_json = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Compact }
    }

    /// Guess the format of a document already in memory.
    pub fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Compact
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "compact" | "toon" => Ok(Self::Compact),
            other => Err(format!("unknown output format '{other}' (expected json or compact)")),
        }
    }
}

pub fn render(graph: &DependencyGraph, format: OutputFormat) -> Result<String, SerializationError> {
    match format {
        OutputFormat::Json => graph.to_json(),
        OutputFormat::Compact => Ok(to_compact(graph)),
    }
}

pub fn parse(text: &str, format: OutputFormat) -> Result<DependencyGraph, SerializationError> {
    match format {
        OutputFormat::Json => DependencyGraph::from_json(text),
        OutputFormat::Compact => parse_compact(text),
    }
}

/// Render and write a graph, creating the parent directory if needed.
pub async fn write_graph(
    graph: &DependencyGraph,
    path: &Path,
    format: OutputFormat,
    runtime: &dyn Runtime,
) -> Result<(), SerializationError> {
    let text = render(graph, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !runtime.exists(parent) {
            runtime
                .create_dir(parent, true)
                .await
                .map_err(|source| SerializationError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    runtime
        .write_file(path, text.as_bytes())
        .await
        .map_err(|source| SerializationError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), format = %format, bytes = text.len(), "wrote graph");
    Ok(())
}

/// Load a graph written by [`write_graph`]. The format is detected from the
/// content.
pub async fn read_graph(
    path: &Path,
    runtime: &dyn Runtime,
) -> Result<DependencyGraph, SerializationError> {
    let bytes = runtime
        .read_file(path)
        .await
        .map_err(|source| SerializationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let text = String::from_utf8_lossy(&bytes);
    parse(&text, OutputFormat::sniff(&text))
}
