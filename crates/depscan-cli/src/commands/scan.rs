//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::commands::utils;
use crate::config::DepscanConfig;
use crate::error::Result;
use crate::ui;
use depscan_graph::{NativeRuntime, Runtime, Scanner, write_graph};
use std::sync::Arc;

/// Execute the scan command.
///
/// 1. Merge configuration layers and validate them
/// 2. Scan the tree
/// 3. Write the graph in the selected format
/// 4. Print the summary
pub async fn execute(args: ScanArgs) -> Result<()> {
    let mut config = DepscanConfig::load(&args)?;
    let cwd = utils::get_cwd()?;
    config.root = utils::resolve_path(&config.root, &cwd);

    let output = utils::resolve_path(&config.output_path(), &cwd);
    let format = config.output_format();
    let scan_config = config.to_scan_config()?;

    ui::info(&format!("Scanning {}", config.root.display()));

    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime);
    let report = Scanner::new(scan_config).scan(Arc::clone(&runtime)).await?;

    if !report.is_complete() {
        ui::warning(&format!(
            "{} file(s) could not be parsed and were left out of the graph",
            report.parse_failures.len()
        ));
    }

    write_graph(&report.graph, &output, format, runtime.as_ref()).await?;

    ui::print_scan_summary(&report);
    ui::success(&format!("Wrote {} graph to {}", format, output.display()));
    Ok(())
}
