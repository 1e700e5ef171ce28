use std::path::{Path, PathBuf};

/// Default database file, relative to the current directory
pub const DEFAULT_DB_FILE: &str = "company.db";

/// Environment variable the CLI reads for `--db`
pub const DB_ENV_VAR: &str = "ROSTER_DB";

/// Where the store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        StoreConfig {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}
