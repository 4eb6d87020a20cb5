#![forbid(unsafe_code)]
//! Filesystem project store.
//!
//! One JSON object per file; the filename minus `.json` becomes the project
//! id. Records that fail to parse or validate are skipped with a warning so
//! a single bad file never takes down the whole catalog. A missing source
//! directory is "no data", not an error.

mod collections;
mod scan;

pub use collections::load_collections;
pub use scan::{load_project, load_projects, scan_projects, ScanReport, SkippedFile, SkipReason};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CRATE_NAME: &str = "folio-store";

#[derive(Debug)]
#[non_exhaustive]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Config {
        path: PathBuf,
        message: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store io failure at {}: {source}", path.display())
            }
            Self::Config { path, message } => {
                write!(f, "collections config {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config { .. } => None,
        }
    }
}
