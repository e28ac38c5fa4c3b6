//! Terminal output: status lines and summaries, all on stderr so stdout
//! stays free for `inspect` results.
//!
//! ```no_run
//! use depscan_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Scanning ./repo");
//! ui::success("Wrote dep-graph.toon");
//! ```

mod format;
mod messages;

use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;

pub use format::{display_path, format_duration, print_scan_summary};
pub use messages::{info, success, warning};

/// Whether color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise stderr must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Fix the color decision for the rest of the process.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_color());
}

/// Render `value` with `style` when stderr supports color.
pub(crate) fn paint(value: impl Display, style: Style) -> String {
    value
        .if_supports_color(Stream::Stderr, |text| text.style(style))
        .to_string()
}
