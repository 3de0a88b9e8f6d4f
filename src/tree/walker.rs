//! Filesystem walker for enumerating the files under a root

use crate::error::HashError;
use crate::tree::builder::UnsupportedEntryPolicy;
use serde::Serialize;
use std::fmt;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Kind of an entry that is neither a regular file nor a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Symlink,
    BrokenSymlink,
    Socket,
    Fifo,
    BlockDevice,
    CharDevice,
    Other,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Symlink => "symlink",
            EntryKind::BrokenSymlink => "broken symlink",
            EntryKind::Socket => "socket",
            EntryKind::Fifo => "fifo",
            EntryKind::BlockDevice => "block device",
            EntryKind::CharDevice => "character device",
            EntryKind::Other => "special file",
        };
        f.write_str(name)
    }
}

impl EntryKind {
    fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            return EntryKind::Symlink;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_socket() {
                return EntryKind::Socket;
            }
            if file_type.is_fifo() {
                return EntryKind::Fifo;
            }
            if file_type.is_block_device() {
                return EntryKind::BlockDevice;
            }
            if file_type.is_char_device() {
                return EntryKind::CharDevice;
            }
        }
        EntryKind::Other
    }
}

/// A regular file discovered under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// An entry that was left out of the digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Result of walking a tree
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub files: Vec<FileEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Classify symlinks by their target instead of as symlinks
    pub follow_symlinks: bool,
    /// File or directory names to prune (exact component match)
    pub ignore_patterns: Vec<String>,
    /// What to do with entries that are neither files nor directories
    pub unsupported_entries: UnsupportedEntryPolicy,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            ignore_patterns: Vec::new(),
            unsupported_entries: UnsupportedEntryPolicy::Skip,
        }
    }
}

/// Filesystem walker
///
/// walkdir keeps its own stack of open directories, so depth is bounded by
/// the filesystem rather than the call stack.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect every regular file
    ///
    /// Enumeration order is whatever the filesystem reports; callers sort
    /// afterwards.
    pub fn walk(&self) -> Result<WalkOutcome, HashError> {
        let mut outcome = WalkOutcome::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.handle_walk_error(err, &mut outcome)?;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| {
                    let path = entry.path().to_path_buf();
                    match e.into_io_error() {
                        Some(io_err) => HashError::from_io(&path, io_err),
                        None => HashError::NotFound { path },
                    }
                })?;
                outcome.files.push(FileEntry {
                    path: entry.into_path(),
                    size: metadata.len(),
                });
                continue;
            }

            let kind = EntryKind::from_file_type(file_type);
            self.record_unsupported(entry.into_path(), kind, &mut outcome)?;
        }

        debug!(
            root = %self.root.display(),
            files = outcome.files.len(),
            skipped = outcome.skipped.len(),
            "Walked directory tree"
        );

        Ok(outcome)
    }

    /// Translate a walkdir error, treating broken symlinks as unsupported entries
    fn handle_walk_error(
        &self,
        err: walkdir::Error,
        outcome: &mut WalkOutcome,
    ) -> Result<(), HashError> {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        if let Some(ancestor) = err.loop_ancestor() {
            return Err(HashError::SymlinkLoop {
                path,
                ancestor: ancestor.to_path_buf(),
            });
        }

        let is_symlink = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if is_symlink {
            match fs::metadata(&path) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return self.record_unsupported(path, EntryKind::BrokenSymlink, outcome);
                }
                Err(e) => return Err(HashError::from_io(&path, e)),
                Ok(_) => {}
            }
        }

        match err.into_io_error() {
            Some(io_err) => Err(HashError::from_io(&path, io_err)),
            None => Err(HashError::NotFound { path }),
        }
    }

    fn record_unsupported(
        &self,
        path: PathBuf,
        kind: EntryKind,
        outcome: &mut WalkOutcome,
    ) -> Result<(), HashError> {
        match self.config.unsupported_entries {
            UnsupportedEntryPolicy::Skip => {
                warn!(path = %path.display(), kind = %kind, "Skipping unsupported entry");
                outcome.skipped.push(SkippedEntry { path, kind });
                Ok(())
            }
            UnsupportedEntryPolicy::Error => Err(HashError::UnsupportedEntry { path, kind }),
        }
    }

    /// Check whether an entry's own name matches an ignore pattern
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if self.config.ignore_patterns.is_empty() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.as_str() == name)
    }
}
