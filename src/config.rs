//! Configuration System
//!
//! Layered TOML configuration for the command-line tool: built-in defaults,
//! a global user file, then a workspace file. The hashing core itself takes
//! explicit [`TreeHasherConfig`] values and never reads configuration.

use crate::logging::LoggingConfig;
use crate::tree::builder::TreeHasherConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirprintConfig {
    /// Tree and file hashing settings
    #[serde(default)]
    pub hashing: TreeHasherConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DirprintConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.hashing.validate()
    }
}
