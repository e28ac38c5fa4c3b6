//! Scan configuration and shared result types.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::error::ScanError;
use crate::file_id::FileId;
use crate::language::Language;

/// Directory names never descended into, whatever their depth.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Package managers
    "node_modules",
    "vendor",
    "bower_components",
    // Python environments and caches
    "venv",
    ".venv",
    "virtualenv",
    ".virtualenv",
    "env",
    ".env",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "site-packages",
    // Build outputs
    "dist",
    "build",
    ".next",
    "out",
    "target",
    "_build",
    ".output",
    // Editors
    ".idea",
    ".vscode",
    // Data and caches
    ".data",
    ".cache",
    "cache",
    // Coverage reports
    "coverage",
    ".coverage",
    "htmlcov",
];

/// Maximum source file size in bytes (10 MB).
///
/// Larger files are reported as parse failures and left out of the graph.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Options for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan. Canonicalized by the scanner before walking.
    pub root: PathBuf,

    /// Directory names to prune during the walk.
    pub excludes: BTreeSet<String>,

    /// Languages to parse; files of other languages are skipped by the walker.
    pub languages: BTreeSet<Language>,

    /// Module name used for module-qualified imports.
    ///
    /// `None` means: read the `module` directive of `<root>/go.mod`, if any.
    pub module: Option<String>,

    /// Maximum number of files parsed concurrently.
    ///
    /// `None` uses the available parallelism of the machine.
    pub jobs: Option<usize>,

    /// Files larger than this are not parsed.
    pub max_file_size: u64,
}

impl ScanConfig {
    /// Configuration with the default exclusions and every language enabled.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            languages: Language::ALL.into_iter().collect(),
            module: None,
            jobs: None,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Add directory names to the exclusion set.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(excludes.into_iter().map(Into::into));
        self
    }

    /// Drop the built-in exclusions, keeping only ones added later.
    pub fn without_default_excludes(mut self) -> Self {
        self.excludes.clear();
        self
    }

    pub fn with_languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        self.languages = languages.into_iter().collect();
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excludes.contains(dir_name)
    }

    /// Parallelism for the parse stage.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.jobs == Some(0) {
            return Err(ScanError::InvalidConfig(
                "jobs must be at least 1".to_string(),
            ));
        }
        if self.languages.is_empty() {
            return Err(ScanError::InvalidConfig(
                "at least one language must be enabled".to_string(),
            ));
        }
        if self.module.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ScanError::InvalidConfig(
                "module name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of resolving one import specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// The specifier names a file in the graph.
    Resolved(FileId),

    /// A bare specifier (package, stdlib module) outside the scanned tree.
    External(String),

    /// A path-like specifier with no matching file.
    Unresolved(String),
}

impl fmt::Display for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveResult::Resolved(id) => write!(f, "Resolved({})", id),
            ResolveResult::External(name) => write!(f, "External({})", name),
            ResolveResult::Unresolved(specifier) => write!(f, "Unresolved({})", specifier),
        }
    }
}
