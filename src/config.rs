//! Configuration System
//!
//! Layered configuration for mirror runs: built-in defaults, a global config
//! file, an explicit `--config` file and `MMIRROR__*` environment variables,
//! in increasing order of precedence. Command-line flags override the result.

use crate::error::MirrorError;
use crate::logging::LoggingConfig;
use crate::materialize::MaterializePolicy;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MmirrorConfig {
    /// Walk and materialization defaults
    #[serde(default)]
    pub mirror: MirrorSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for a mirror run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSettings {
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub overwrite_symlinks: bool,
    #[serde(default = "default_true")]
    pub fail_if_not_empty: bool,
    #[serde(default)]
    pub simulate: bool,
}

fn default_depth() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            follow_symlinks: false,
            overwrite_symlinks: false,
            fail_if_not_empty: default_true(),
            simulate: false,
        }
    }
}

impl MirrorSettings {
    pub fn policy(&self) -> MaterializePolicy {
        MaterializePolicy {
            overwrite_symlinks: self.overwrite_symlinks,
            simulate: self.simulate,
            fail_if_not_empty: self.fail_if_not_empty,
        }
    }
}

impl MmirrorConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), MirrorError> {
        if self.mirror.depth < 1 {
            return Err(MirrorError::Config(format!(
                "mirror.depth must be at least 1, got {}",
                self.mirror.depth
            )));
        }
        if self.logging.format != "text" && self.logging.format != "json" {
            return Err(MirrorError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, MirrorError> {
        toml::to_string_pretty(self)
            .map_err(|e| MirrorError::Config(format!("Failed to render configuration: {}", e)))
    }
}
