//! CLI route: single route table and run context. Dispatches to the hashers and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_file_json, format_file_text, format_tree_json, format_tree_text, FileReport,
};
use crate::config::{ConfigLoader, DirprintConfig};
use crate::error::AppError;
use crate::tree::builder::{TreeHasher, TreeHasherConfig, UnsupportedEntryPolicy};
use crate::tree::digest::DigestAlgorithm;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime context for CLI execution: workspace and loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: DirprintConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.validate().map_err(AppError::ConfigError)?;

        debug!(
            workspace = %workspace_root.display(),
            algorithm = %config.hashing.algorithm,
            "Configuration loaded"
        );

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &DirprintConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, AppError> {
        match command {
            Commands::File {
                path,
                algorithm,
                format,
            } => self.handle_file(path, *algorithm, *format),
            Commands::Tree {
                path,
                algorithm,
                threads,
                no_follow_symlinks,
                strict,
                ignore,
                manifest,
                format,
            } => {
                let mut hashing = self.config.hashing.clone();
                if let Some(algorithm) = algorithm {
                    hashing.algorithm = *algorithm;
                }
                if let Some(threads) = threads {
                    hashing.threads = *threads;
                }
                if *no_follow_symlinks {
                    hashing.follow_symlinks = false;
                }
                if *strict {
                    hashing.unsupported_entries = UnsupportedEntryPolicy::Error;
                }
                hashing.ignore_patterns.extend(ignore.iter().cloned());
                hashing.validate().map_err(AppError::InvalidArgument)?;

                self.handle_tree(path, hashing, *manifest, *format)
            }
        }
    }

    fn handle_file(
        &self,
        path: &Path,
        algorithm: Option<DigestAlgorithm>,
        format: OutputFormat,
    ) -> Result<String, AppError> {
        let mut hasher = self.config.hashing.file_hasher();
        if let Some(algorithm) = algorithm {
            hasher = hasher.with_algorithm(algorithm);
        }

        let report = FileReport {
            path: path.to_path_buf(),
            algorithm: hasher.algorithm(),
            digest: hasher.hash_file(path)?,
        };

        match format {
            OutputFormat::Text => Ok(format_file_text(&report)),
            OutputFormat::Json => format_file_json(&report),
        }
    }

    fn handle_tree(
        &self,
        path: &Path,
        hashing: TreeHasherConfig,
        manifest: bool,
        format: OutputFormat,
    ) -> Result<String, AppError> {
        let tree = TreeHasher::new(path.to_path_buf())
            .with_config(hashing)
            .build()?;

        match format {
            OutputFormat::Text => Ok(format_tree_text(&tree, manifest)),
            OutputFormat::Json => format_tree_json(&tree, manifest),
        }
    }
}
