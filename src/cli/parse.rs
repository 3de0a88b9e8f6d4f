//! CLI parse: clap types for dirprint. No behavior; definitions only.

use crate::tree::digest::DigestAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Dirprint CLI - Deterministic content fingerprints for files and directory trees
#[derive(Parser, Debug)]
#[command(name = "dirprint")]
#[command(about = "Deterministic content fingerprints for files and directory trees")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory searched for .dirprint.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Command output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the content digest of a single file
    File {
        /// File to hash
        path: PathBuf,

        /// Digest algorithm (md5, sha256, blake3)
        #[arg(long)]
        algorithm: Option<DigestAlgorithm>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the aggregate digest of a directory tree
    Tree {
        /// Directory to hash
        path: PathBuf,

        /// Digest algorithm (md5, sha256, blake3)
        #[arg(long)]
        algorithm: Option<DigestAlgorithm>,

        /// Worker threads for file hashing (0 = all cores, 1 = sequential)
        #[arg(long)]
        threads: Option<usize>,

        /// Report symlinks as unsupported entries instead of following them
        #[arg(long)]
        no_follow_symlinks: bool,

        /// Fail on unsupported entries instead of skipping them
        #[arg(long)]
        strict: bool,

        /// File or directory name to leave out (repeatable)
        #[arg(long = "ignore", value_name = "NAME")]
        ignore: Vec<String>,

        /// Also print every "<digest> <relative-path>" record
        #[arg(long)]
        manifest: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
