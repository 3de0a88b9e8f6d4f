//! Merge rules: defaults, override order.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("hashing.algorithm", "md5")?
        .set_default("hashing.follow_symlinks", true)?
        .set_default("hashing.unsupported_entries", "skip")?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
