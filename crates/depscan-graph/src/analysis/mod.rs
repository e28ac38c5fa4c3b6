//! Everything between a directory on disk and a finished graph: discovery,
//! parsing, extraction, resolution and the scan pipeline that runs them.

pub mod config;
pub mod extractors;
pub mod grammar;
pub mod resolver;
pub mod scanner;
pub mod walker;

pub use config::{DEFAULT_EXCLUDES, MAX_FILE_SIZE, ResolveResult, ScanConfig};
pub use extractors::extract;
pub use grammar::parse_source;
pub use resolver::{ImportResolver, ModuleContext, ResolutionStats};
pub use scanner::{ScanReport, Scanner};
pub use walker::{SourceFile, discover};
