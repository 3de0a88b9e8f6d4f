//! Error types for file and tree fingerprinting.

use crate::tree::walker::EntryKind;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Hashing-related errors
///
/// Every failure aborts the whole operation: no digest is ever produced
/// from a partially read file or a partially walked tree.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Unsupported entry ({kind}): {}", path.display())]
    UnsupportedEntry { path: PathBuf, kind: EntryKind },

    #[error("Symlink loop at {} (points back to {})", path.display(), ancestor.display())]
    SymlinkLoop { path: PathBuf, ancestor: PathBuf },

    #[error("Path {} is not under root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Hashing cancelled")]
    Cancelled,
}

impl HashError {
    /// Attach a path to an io error, keeping NotFound distinguishable
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => HashError::NotFound {
                path: path.to_path_buf(),
            },
            _ => HashError::NotReadable {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Application-level errors (configuration, CLI, logging)
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
