//! Whole-graph algorithms run after the reverse index is built.

mod cycles;
mod dead_code;

pub use cycles::{find_cycles, strongly_connected_components};
pub use dead_code::find_dead_code;
