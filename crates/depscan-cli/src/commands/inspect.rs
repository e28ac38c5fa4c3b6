//! Inspect command implementation.
//!
//! Reads a graph written by `depscan scan` (either format) and prints either
//! an overview or one file's neighbourhood.

use crate::cli::InspectArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use chrono::SecondsFormat;
use depscan_graph::{DependencyGraph, FileId, GraphStatistics, Language, NativeRuntime, read_graph};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whole-graph view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOverview {
    pub statistics: GraphStatistics,
    pub circular: Vec<Vec<String>>,
    pub dead_code: Vec<String>,
    pub last_updated: String,
}

/// One file and its edges.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: String,
    pub language: Language,
    pub imports: Vec<ImportView>,
    pub exports: Vec<ExportView>,
    pub imported_by: Vec<String>,
    pub cycles: Vec<Vec<String>>,
    pub dead: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportView {
    pub raw: String,
    pub resolved: Option<String>,
    pub line: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportView {
    pub name: String,
    pub kind: String,
    pub is_default: bool,
    pub line: u32,
}

impl GraphOverview {
    pub fn build(graph: &DependencyGraph) -> Self {
        Self {
            statistics: graph.statistics(),
            circular: graph.circular.iter().map(|cycle| strings(cycle)).collect(),
            dead_code: strings(&graph.dead_code),
            last_updated: graph.last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl FileReport {
    /// `None` when `id` is not in the graph.
    pub fn build(graph: &DependencyGraph, id: &FileId) -> Option<Self> {
        let node = graph.get(id)?;
        Some(Self {
            path: id.to_string(),
            language: node.language,
            imports: node
                .imports
                .iter()
                .map(|import| ImportView {
                    raw: import.raw_path.clone(),
                    resolved: import.resolved_path.as_ref().map(ToString::to_string),
                    line: import.line,
                })
                .collect(),
            exports: node
                .exports
                .iter()
                .map(|export| ExportView {
                    name: export.name.clone(),
                    kind: export.kind.to_string(),
                    is_default: export.is_default,
                    line: export.line,
                })
                .collect(),
            imported_by: node.imported_by.iter().map(ToString::to_string).collect(),
            cycles: graph
                .cycles_containing(id)
                .into_iter()
                .map(strings)
                .collect(),
            dead: graph.is_dead(id),
        })
    }
}

fn strings(ids: &[FileId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

/// Execute the inspect command.
pub async fn execute(args: InspectArgs) -> Result<()> {
    utils::validate_graph_file(&args.graph)?;
    let graph = read_graph(&args.graph, &NativeRuntime)
        .await
        .with_hint("Run 'depscan scan' to write a fresh graph")?;
    let base = graph_dir(&args.graph);

    match args.file {
        None => {
            let overview = GraphOverview::build(&graph);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print_overview(&overview, &base);
            }
        }
        Some(query) => {
            let id = find(&graph, &query)?;
            let report = FileReport::build(&graph, &id).ok_or_else(|| {
                CliError::InvalidArgument(format!("'{}' is not in the graph", query))
            })?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_file(&report, &base);
            }
        }
    }

    Ok(())
}

/// Match `query` as a path on disk first, then as a unique suffix.
fn find(graph: &DependencyGraph, query: &str) -> Result<FileId> {
    if let Ok(canonical) = Path::new(query).canonicalize() {
        let id = FileId::new(canonical);
        if graph.contains(&id) {
            return Ok(id);
        }
    }

    graph.find_file(query).cloned().ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "No unique file matches '{}'\n\nHint: Use a longer path suffix such as src/app.ts",
            query
        ))
    })
}

/// Directory the graph was written to; paths under it print relative.
fn graph_dir(graph: &Path) -> PathBuf {
    graph
        .canonicalize()
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .unwrap_or_default()
}

fn rel(path: &str, base: &Path) -> String {
    ui::display_path(&FileId::from_canonical(path), base)
}

fn print_overview(overview: &GraphOverview, base: &Path) {
    let stats = &overview.statistics;
    println!("Files: {}", stats.file_count);
    for (language, count) in &stats.languages {
        println!("  {language}: {count}");
    }
    println!(
        "Imports: {} ({} resolved)",
        stats.import_count, stats.resolved_import_count
    );
    println!("Last updated: {}", overview.last_updated);

    println!();
    println!("Cycles ({}):", overview.circular.len());
    for cycle in &overview.circular {
        let members: Vec<String> = cycle.iter().map(|p| rel(p, base)).collect();
        println!("  {}", members.join(" > "));
    }

    println!();
    println!("Dead code ({}):", overview.dead_code.len());
    for path in &overview.dead_code {
        println!("  {}", rel(path, base));
    }
}

fn print_file(report: &FileReport, base: &Path) {
    println!("{} ({})", rel(&report.path, base), report.language);

    println!("Imports ({}):", report.imports.len());
    for import in &report.imports {
        match &import.resolved {
            Some(target) => println!("  {:>5}  {} -> {}", import.line, import.raw, rel(target, base)),
            None => println!("  {:>5}  {} (unresolved)", import.line, import.raw),
        }
    }

    println!("Exports ({}):", report.exports.len());
    for export in &report.exports {
        let default = if export.is_default { " default" } else { "" };
        println!("  {:>5}  {} {}{}", export.line, export.kind, export.name, default);
    }

    println!("Imported by ({}):", report.imported_by.len());
    for importer in &report.imported_by {
        println!("  {}", rel(importer, base));
    }

    for cycle in &report.cycles {
        let members: Vec<String> = cycle.iter().map(|p| rel(p, base)).collect();
        println!("Cycle: {}", members.join(" > "));
    }

    if report.dead {
        println!("Nothing imports this file.");
    }
}
