//! Configuration merge rules

pub mod merge_policy;
