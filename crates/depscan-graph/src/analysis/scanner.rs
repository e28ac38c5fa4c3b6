//! Staged scan pipeline.
//!
//! walk → parse (bounded, parallel) → insert → resolve → finalize
//!
//! Parsing is the only concurrent stage. Workers return isolated
//! [`FileNode`]s and the `join_next` loop in [`Scanner::parse_all`] is the
//! single place nodes enter the graph. Every later stage is a sequential
//! pass that starts after all workers have finished.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};

use super::config::ScanConfig;
use super::extractors::extract;
use super::grammar::parse_source;
use super::resolver::{ImportResolver, ModuleContext, ResolutionStats};
use super::walker::{self, SourceFile};
use crate::error::{ParseError, ScanError};
use crate::file_id::FileId;
use crate::file_node::FileNode;
use crate::graph::{DependencyGraph, GraphStatistics};
use crate::language::Language;
use crate::runtime::Runtime;

/// Everything one scan produced.
#[derive(Debug)]
pub struct ScanReport {
    pub graph: DependencyGraph,
    /// Canonicalized scan root.
    pub root: PathBuf,
    /// Files dropped because they could not be parsed, ordered by path.
    pub parse_failures: Vec<ParseError>,
    /// Source files found by the walk, parsed or not.
    pub files_discovered: usize,
    pub resolution: ResolutionStats,
    /// Module context used for module-qualified imports, if any.
    pub module: Option<ModuleContext>,
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn statistics(&self) -> GraphStatistics {
        self.graph.statistics()
    }

    /// No file was dropped.
    pub fn is_complete(&self) -> bool {
        self.parse_failures.is_empty()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.statistics();
        writeln!(f, "Scan of {}", self.root.display())?;
        writeln!(f, "Files: {}", stats.file_count)?;
        for (language, count) in &stats.languages {
            writeln!(f, "  {language}: {count}")?;
        }
        writeln!(
            f,
            "Imports: {} ({} resolved)",
            stats.import_count, stats.resolved_import_count
        )?;
        writeln!(f, "Cycles: {}", stats.cycle_count)?;
        writeln!(f, "Dead code: {}", stats.dead_code_count)?;
        if !self.parse_failures.is_empty() {
            writeln!(f, "Parse failures: {}", self.parse_failures.len())?;
        }
        Ok(())
    }
}

/// Runs one scan per call; holds no state between scans.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the configured root.
    ///
    /// Fails only on configuration or filesystem errors. Files that cannot be
    /// parsed are listed in [`ScanReport::parse_failures`].
    pub async fn scan(&self, runtime: Arc<dyn Runtime>) -> Result<ScanReport, ScanError> {
        let started = Instant::now();
        self.config.validate()?;

        let (root, sources) = self.discover().await?;
        let files_discovered = sources.len();
        info!(root = %root.display(), files = files_discovered, "discovered source files");

        let (mut graph, parse_failures) = self.parse_all(sources, &runtime).await?;
        info!(
            parsed = graph.len(),
            failed = parse_failures.len(),
            "parsed source files"
        );

        let module = match &self.config.module {
            Some(name) => Some(ModuleContext::new(name.as_str())),
            None => ModuleContext::detect(&root, runtime.as_ref()).await,
        };
        let resolver = ImportResolver::new(&root, module.clone());
        let resolution = resolver.resolve_graph(&mut graph, runtime.as_ref()).await;
        info!(
            resolved = resolution.resolved,
            external = resolution.external,
            unresolved = resolution.unresolved + resolution.outside_graph,
            "resolved imports"
        );

        graph.finalize();
        info!(
            cycles = graph.circular.len(),
            dead_code = graph.dead_code.len(),
            "analyzed graph"
        );

        Ok(ScanReport {
            graph,
            root,
            parse_failures,
            files_discovered,
            resolution,
            module,
            elapsed: started.elapsed(),
        })
    }

    /// Canonicalize the root and walk it on the blocking pool.
    async fn discover(&self) -> Result<(PathBuf, Vec<SourceFile>), ScanError> {
        let config = self.config.clone();
        task::spawn_blocking(move || {
            let root = std::fs::canonicalize(&config.root)
                .map_err(|e| ScanError::filesystem(&config.root, e))?;
            if !root.is_dir() {
                return Err(ScanError::filesystem(&root, "not a directory"));
            }
            let files = walker::discover(&root, &config)?;
            Ok((root, files))
        })
        .await
        .map_err(|e| ScanError::Task(e.to_string()))?
    }

    /// Parse every file with at most `jobs` workers in flight.
    async fn parse_all(
        &self,
        sources: Vec<SourceFile>,
        runtime: &Arc<dyn Runtime>,
    ) -> Result<(DependencyGraph, Vec<ParseError>), ScanError> {
        let jobs = self.config.effective_jobs();
        let max_file_size = self.config.max_file_size;
        let semaphore = Arc::new(Semaphore::new(jobs));
        let mut join_set = JoinSet::new();
        debug!(jobs, "starting parse workers");

        for source in sources {
            let permits = Arc::clone(&semaphore);
            let runtime = Arc::clone(runtime);

            join_set.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| ScanError::Task(e.to_string()))?;
                parse_file(source, runtime.as_ref(), max_file_size).await
            });
        }

        let mut graph = DependencyGraph::new();
        let mut failures = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.map_err(|e| ScanError::Task(e.to_string()))??;
            match outcome {
                Ok(node) => {
                    debug!(
                        path = %node.path,
                        imports = node.imports.len(),
                        exports = node.exports.len(),
                        "parsed file"
                    );
                    graph.insert_file(node);
                }
                Err(failure) => {
                    warn!(path = %failure.path.display(), reason = %failure.reason, "skipping file");
                    failures.push(failure);
                }
            }
        }

        failures.sort_by(|a, b| a.path.cmp(&b.path));
        Ok((graph, failures))
    }
}

/// Read and parse one file.
///
/// The outer error aborts the scan; the inner one drops only this file.
async fn parse_file(
    source: SourceFile,
    runtime: &dyn Runtime,
    max_file_size: u64,
) -> Result<Result<FileNode, ParseError>, ScanError> {
    let SourceFile { path, language } = source;

    let metadata = runtime
        .metadata(&path)
        .await
        .map_err(|e| ScanError::filesystem(&path, e))?;
    if metadata.size > max_file_size {
        return Ok(Err(ParseError::new(
            &path,
            format!(
                "file is {} bytes, over the {} byte limit",
                metadata.size, max_file_size
            ),
        )));
    }

    let bytes = runtime
        .read_file(&path)
        .await
        .map_err(|e| ScanError::filesystem(&path, e))?;

    task::spawn_blocking(move || parse_bytes(&path, language, bytes))
        .await
        .map_err(|e| ScanError::Task(e.to_string()))
}

fn parse_bytes(path: &Path, language: Language, bytes: Vec<u8>) -> Result<FileNode, ParseError> {
    let source =
        String::from_utf8(bytes).map_err(|e| ParseError::new(path, format!("invalid UTF-8: {e}")))?;

    let tree = parse_source(path, source.as_bytes(), language)?;
    if tree.root_node().has_error() {
        debug!(path = %path.display(), "syntax errors; extracting from the recovered tree");
    }

    let (imports, exports) = extract(&tree, &source, language);
    Ok(FileNode::new(FileId::new(path), language)
        .with_imports(imports)
        .with_exports(exports))
}
