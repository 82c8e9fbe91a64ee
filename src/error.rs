// File: src/error.rs
use std::path::{Path, PathBuf};

/// Failure to load one dataset source.
///
/// Never fatal for the engine: the caller logs it and falls back to an empty
/// collection for that source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot read header of dataset {}: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset {} has no `{column}` column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Header { path, .. }
            | LoadError::MissingColumn { path, .. } => path,
        }
    }
}
