// File: src/config.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "dataset";
pub const ENTITIES_FILE: &str = "entities.csv";
pub const KEYWORDS_FILE: &str = "keywords.csv";
pub const PATTERNS_FILE: &str = "patterns.csv";

/// Number of (query, count) results kept before the oldest quarter is evicted.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Locations of the three dataset sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub entities: PathBuf,
    pub keywords: PathBuf,
    pub patterns: PathBuf,
}

impl DatasetPaths {
    /// The conventional file names inside one directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            entities: dir.join(ENTITIES_FILE),
            keywords: dir.join(KEYWORDS_FILE),
            patterns: dir.join(PATTERNS_FILE),
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub datasets: DatasetPaths,
    /// Zero disables result caching.
    pub cache_capacity: usize,
    pub default_max_results: usize,
}

impl EngineConfig {
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            datasets: DatasetPaths::in_dir(dir),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetPaths::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_max_results: DEFAULT_MAX_RESULTS,
        }
    }
}
