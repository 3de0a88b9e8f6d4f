//! Tree hasher: walks a directory and folds every file digest into one

use crate::error::HashError;
use crate::tree::canonical::{self, PathDigestEntry, PathDigestMap};
use crate::tree::digest::{Digest, DigestAlgorithm};
use crate::tree::hasher::{FileHasher, DEFAULT_BUFFER_SIZE};
use crate::tree::path;
use crate::tree::walker::{FileEntry, SkippedEntry, Walker, WalkerConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Handling of entries that are neither regular files nor directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedEntryPolicy {
    /// Leave the entry out and log a warning
    #[default]
    Skip,
    /// Fail the whole tree hash
    Error,
}

/// Tree hashing configuration (`[hashing]` in config files)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeHasherConfig {
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Read buffer per file, in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Worker threads for file hashing (0 = available parallelism, 1 = sequential)
    #[serde(default)]
    pub threads: usize,

    #[serde(default = "default_true")]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub unsupported_entries: UnsupportedEntryPolicy,

    /// File or directory names to leave out of the tree
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for TreeHasherConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            buffer_size: default_buffer_size(),
            threads: 0,
            follow_symlinks: default_true(),
            unsupported_entries: UnsupportedEntryPolicy::default(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl TreeHasherConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_size == 0 {
            return Err("hashing.buffer_size must be greater than zero".to_string());
        }
        if self.ignore_patterns.iter().any(|p| p.is_empty()) {
            return Err("hashing.ignore_patterns must not contain empty names".to_string());
        }
        Ok(())
    }

    /// Number of files hashed concurrently
    pub fn effective_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    pub fn file_hasher(&self) -> FileHasher {
        FileHasher::new()
            .with_algorithm(self.algorithm)
            .with_buffer_size(self.buffer_size)
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            unsupported_entries: self.unsupported_entries,
        }
    }
}

/// Result of hashing a directory tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeDigest {
    /// Canonical root the relative paths are computed against
    pub root: PathBuf,
    pub algorithm: DigestAlgorithm,
    pub digest: Digest,
    /// Sorted entries in the order they were fed to the aggregate
    pub entries: Vec<PathDigestEntry>,
    pub total_bytes: u64,
    pub skipped: Vec<SkippedEntry>,
}

impl TreeDigest {
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }
}

/// Computes the aggregate digest of a directory tree
pub struct TreeHasher {
    root: PathBuf,
    config: TreeHasherConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl TreeHasher {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: TreeHasherConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: TreeHasherConfig) -> Self {
        self.config = config;
        self
    }

    /// Abort with `HashError::Cancelled` once the flag is set
    ///
    /// The flag is checked before each file is hashed.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Walk, hash, canonicalize and aggregate
    #[instrument(skip(self), fields(root = %self.root.display(), algorithm = %self.config.algorithm))]
    pub fn build(&self) -> Result<TreeDigest, HashError> {
        let start = Instant::now();
        let root = self.resolve_root()?;

        let (map, skipped, total_bytes) = self.collect_from(&root)?;
        let entries = canonical::canonicalize(&root, map)?;
        let digest = canonical::aggregate(self.config.algorithm, &entries);

        info!(
            files = entries.len(),
            skipped = skipped.len(),
            total_bytes,
            digest = %digest,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tree hash completed"
        );

        Ok(TreeDigest {
            root,
            algorithm: self.config.algorithm,
            digest,
            entries,
            total_bytes,
            skipped,
        })
    }

    /// Aggregate digest only
    pub fn compute_digest(&self) -> Result<Digest, HashError> {
        Ok(self.build()?.digest)
    }

    /// Absolute path to digest map, before canonicalization
    pub fn collect(&self) -> Result<PathDigestMap, HashError> {
        let root = self.resolve_root()?;
        let (map, _, _) = self.collect_from(&root)?;
        Ok(map)
    }

    fn resolve_root(&self) -> Result<PathBuf, HashError> {
        let metadata = fs::metadata(&self.root).map_err(|e| HashError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(HashError::NotADirectory {
                path: self.root.clone(),
            });
        }
        path::canonicalize_root(&self.root)
    }

    fn collect_from(
        &self,
        root: &Path,
    ) -> Result<(PathDigestMap, Vec<SkippedEntry>, u64), HashError> {
        let walker = Walker::with_config(root.to_path_buf(), self.config.walker_config());
        let outcome = walker.walk()?;
        let total_bytes = outcome.files.iter().map(|f| f.size).sum();

        let hashed = self.hash_files(&outcome.files)?;
        let map: PathDigestMap = hashed.into_iter().collect();
        Ok((map, outcome.skipped, total_bytes))
    }

    fn hash_files(&self, files: &[FileEntry]) -> Result<Vec<(PathBuf, Digest)>, HashError> {
        let hasher = self.config.file_hasher();
        let threads = self.config.effective_threads();

        let hash_one = |entry: &FileEntry| -> Result<(PathBuf, Digest), HashError> {
            self.check_cancelled()?;
            let digest = hasher.hash_file(&entry.path)?;
            Ok((entry.path.clone(), digest))
        };

        if threads <= 1 || files.len() <= 1 {
            debug!(files = files.len(), "Hashing files sequentially");
            return files.iter().map(hash_one).collect();
        }

        debug!(files = files.len(), threads, "Hashing files on worker pool");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("dirprint-hash-{}", i))
            .build()
            .map_err(|e| HashError::WorkerPool(e.to_string()))?;

        pool.install(|| files.par_iter().map(hash_one).collect())
    }

    fn check_cancelled(&self) -> Result<(), HashError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(HashError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// MD5 tree digest with the default configuration
pub fn hash_tree(root: &Path) -> Result<Digest, HashError> {
    TreeHasher::new(root.to_path_buf()).compute_digest()
}
