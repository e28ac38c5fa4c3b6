//! Formatting for durations, paths and the scan summary.

use super::paint;
use depscan_graph::{FileId, ScanReport};
use owo_colors::Style;
use std::path::Path;
use std::time::Duration;

/// Format a duration with the most readable unit.
///
/// ```
/// use std::time::Duration;
/// use depscan_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// A file id relative to `root` when it lies under it.
pub fn display_path(id: &FileId, root: &Path) -> String {
    id.as_path()
        .strip_prefix(root)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| id.to_string())
}

/// Print the per-language file counts, cycles and dead code of a scan.
pub fn print_scan_summary(report: &ScanReport) {
    let stats = report.statistics();

    let rule = paint("─".repeat(40), Style::new().dimmed());

    eprintln!();
    eprintln!("{}", paint("Scan Summary:", Style::new().bold()));
    eprintln!("{rule}");

    for (language, count) in &stats.languages {
        eprintln!("  {:<28} {:>8}", language.to_string(), count);
    }

    eprintln!("{rule}");
    eprintln!("  {:<28} {:>8}", "Files", stats.file_count);
    eprintln!(
        "  {:<28} {:>8}",
        "Imports resolved",
        format!("{}/{}", stats.resolved_import_count, stats.import_count)
    );

    let cycles = format!("{:>8}", stats.cycle_count);
    let cycle_style = if stats.cycle_count > 0 {
        Style::new().yellow()
    } else {
        Style::new()
    };
    eprintln!("  {:<28} {}", "Cycles", paint(cycles, cycle_style));
    eprintln!("  {:<28} {:>8}", "Dead code", stats.dead_code_count);

    if !report.parse_failures.is_empty() {
        let failures = format!("{:>8}", report.parse_failures.len());
        eprintln!("  {:<28} {}", "Parse failures", paint(failures, Style::new().red()));
    }

    eprintln!("  {:<28} {:>8}", "Time", format_duration(report.elapsed));
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn paths_are_shown_relative_to_the_root() {
        let root = PathBuf::from("/repo");
        assert_eq!(display_path(&FileId::new("/repo/src/app.ts"), &root), "src/app.ts");
        assert_eq!(display_path(&FileId::new("/elsewhere/x.go"), &root), "/elsewhere/x.go");
    }
}
