use std::path::PathBuf;

/// Config file looked up in the scan root when `--config` is not given.
pub const CONFIG_FILE: &str = "depscan.config.json";

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_max_file_size() -> u64 {
    depscan_graph::analysis::MAX_FILE_SIZE
}
