//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("mirror.depth", 1_i64)?
        .set_default("mirror.follow_symlinks", false)?
        .set_default("mirror.overwrite_symlinks", false)?
        .set_default("mirror.fail_if_not_empty", true)?
        .set_default("mirror.simulate", false)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.color", true)
}
