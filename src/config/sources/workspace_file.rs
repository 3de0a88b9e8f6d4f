//! Workspace config file source: <workspace>/.dirprint.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the workspace root
pub const WORKSPACE_CONFIG_FILE: &str = ".dirprint.toml";

pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_CONFIG_FILE)
}

/// Add the workspace config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_config_path(workspace_root);
    if !path.exists() {
        return Ok(builder);
    }
    debug!(config_path = %path.display(), "Loading workspace configuration");
    Ok(builder.add_source(File::from(path).format(config::FileFormat::Toml)))
}
