//! Config loading entry point

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::DirprintConfig;
use config::ConfigError;
use std::path::Path;

/// Loads [`DirprintConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then `<workspace>/.dirprint.toml`
    pub fn load(workspace_root: &Path) -> Result<DirprintConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder.build()?.try_deserialize()
    }

    /// Defaults plus one explicit file; other sources are ignored
    pub fn load_from_file(path: &Path) -> Result<DirprintConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
