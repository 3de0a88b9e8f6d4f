//! CLI presentation: text and JSON renderings of hashing results.

use crate::error::AppError;
use crate::tree::builder::TreeDigest;
use crate::tree::digest::{Digest, DigestAlgorithm};
use serde::Serialize;
use std::path::PathBuf;

/// Result of `dirprint file`
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub algorithm: DigestAlgorithm,
    pub digest: Digest,
}

pub fn format_file_text(report: &FileReport) -> String {
    report.digest.to_string()
}

pub fn format_file_json(report: &FileReport) -> Result<String, AppError> {
    to_json(report)
}

/// Digest on the last line; with `manifest`, one record per file before it
pub fn format_tree_text(tree: &TreeDigest, manifest: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    if manifest {
        lines.extend(tree.entries.iter().map(|entry| entry.record()));
    }
    lines.push(tree.digest.to_string());
    lines.join("\n")
}

/// JSON report; entries are included only with `manifest`
pub fn format_tree_json(tree: &TreeDigest, manifest: bool) -> Result<String, AppError> {
    #[derive(Serialize)]
    struct TreeSummary<'a> {
        root: &'a PathBuf,
        algorithm: DigestAlgorithm,
        digest: &'a Digest,
        file_count: usize,
        total_bytes: u64,
        skipped: &'a [crate::tree::walker::SkippedEntry],
        #[serde(skip_serializing_if = "Option::is_none")]
        entries: Option<&'a [crate::tree::canonical::PathDigestEntry]>,
    }

    to_json(&TreeSummary {
        root: &tree.root,
        algorithm: tree.algorithm,
        digest: &tree.digest,
        file_count: tree.file_count(),
        total_bytes: tree.total_bytes,
        skipped: &tree.skipped,
        entries: manifest.then_some(tree.entries.as_slice()),
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InvalidArgument(format!("Failed to serialize output: {}", e)))
}
