//! Config loader facade: assembles sources in precedence order and validates.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::MmirrorConfig;
use crate::error::MirrorError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, the global file, an optional
    /// explicit file and the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<MmirrorConfig, MirrorError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Loading configuration file");
            builder = explicit_file::add_to_builder(builder, path);
        }
        builder = environment::add_to_builder(builder, None);
        Self::finish(builder)
    }

    /// Load configuration from defaults and a single file, ignoring the
    /// global file and environment.
    pub fn load_from_file(path: &Path) -> Result<MmirrorConfig, MirrorError> {
        let builder = explicit_file::add_to_builder(merge_policy::builder_with_defaults()?, path);
        Self::finish(builder)
    }

    /// Load configuration from defaults, an optional file and the given
    /// variables in place of the process environment.
    pub fn load_with_env(
        explicit: Option<&Path>,
        vars: config::Map<String, String>,
    ) -> Result<MmirrorConfig, MirrorError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path);
        }
        builder = environment::add_to_builder(builder, Some(vars));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<MmirrorConfig, MirrorError> {
        let config: MmirrorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
