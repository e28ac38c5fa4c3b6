//! Command implementations.
//!
//! - [`scan`] - build and write a dependency graph
//! - [`inspect`] - query a written graph
//!
//! Each command exposes an `execute` function taking its parsed arguments.

pub mod inspect;
pub mod scan;
pub(crate) mod utils;

pub use inspect::execute as inspect_execute;
pub use scan::execute as scan_execute;
