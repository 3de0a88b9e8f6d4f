//! Dirprint: Deterministic Content Fingerprints
//!
//! Computes a stable digest for a single file and, recursively, for a whole
//! directory tree. Tree digests change when any file's bytes, any file's
//! relative path, or the set of files changes, and stay the same otherwise.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;

pub use error::{AppError, HashError};
pub use tree::builder::{
    hash_tree, TreeDigest, TreeHasher, TreeHasherConfig, UnsupportedEntryPolicy,
};
pub use tree::canonical::{PathDigestEntry, PathDigestMap};
pub use tree::digest::{Digest, DigestAlgorithm};
pub use tree::hasher::{hash_file, FileHasher};
