//! Canonical ordering and aggregation of per-file digests
//!
//! The aggregate digest is a fold over records of the form
//! `"<digest> <relative-path>"`, fed in sorted order into a single
//! accumulator. Sorting happens only after the full path map is built, so
//! the result does not depend on enumeration or traversal order.

use crate::error::HashError;
use crate::tree::digest::{Digest, DigestAlgorithm};
use crate::tree::path;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Absolute file path to content digest
pub type PathDigestMap = HashMap<PathBuf, Digest>;

/// One file's position in the tree and its content digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathDigestEntry {
    pub relative_path: String,
    pub digest: Digest,
    /// Unrendered relative path bytes, last sort tie-break
    #[serde(skip)]
    raw_key: Vec<u8>,
}

impl PathDigestEntry {
    pub fn new(relative_path: impl Into<String>, digest: Digest) -> Self {
        let relative_path = relative_path.into();
        let raw_key = relative_path.trim_start_matches('/').as_bytes().to_vec();
        Self {
            relative_path,
            digest,
            raw_key,
        }
    }

    /// Entry for a path already stripped of its root
    fn from_stripped(stripped: &Path, digest: Digest) -> Self {
        Self {
            relative_path: path::render_relative(stripped),
            digest,
            raw_key: path::raw_key(stripped),
        }
    }

    /// Record fed into the aggregate hasher
    pub fn record(&self) -> String {
        format!("{} {}", self.digest, self.relative_path)
    }
}

/// Project absolute paths to relative ones and sort the result
pub fn canonicalize(root: &Path, map: PathDigestMap) -> Result<Vec<PathDigestEntry>, HashError> {
    let mut entries = map
        .into_iter()
        .map(|(abs_path, digest)| {
            path::strip_root(&abs_path, root)
                .map(|stripped| PathDigestEntry::from_stripped(stripped, digest))
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_entries(&mut entries);
    Ok(entries)
}

/// Sort by case-folded relative path, then the exact path, then raw bytes
///
/// Paths that differ only in case land next to each other, and the exact
/// comparison makes their relative order stable. Distinct files whose names
/// render identically are ordered by their unrendered bytes.
pub fn sort_entries(entries: &mut [PathDigestEntry]) {
    entries.sort_by_cached_key(|entry| {
        (
            entry.relative_path.to_lowercase(),
            entry.relative_path.clone(),
            entry.raw_key.clone(),
        )
    });
}

/// Fold sorted entries into the tree digest
pub fn aggregate(algorithm: DigestAlgorithm, entries: &[PathDigestEntry]) -> Digest {
    let mut hasher = algorithm.hasher();
    for entry in entries {
        hasher.update(entry.record().as_bytes());
    }
    hasher.finalize()
}
