//! Content fingerprints for files and directory trees
//!
//! A tree digest covers the set of (relative path, content) pairs reachable
//! under a root. It does not depend on where the tree lives on disk or on
//! the order in which the filesystem lists directory entries.

pub mod builder;
pub mod canonical;
pub mod digest;
pub mod hasher;
pub mod path;
pub mod walker;
