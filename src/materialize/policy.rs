//! Materialization policy flags

use serde::{Deserialize, Serialize};

/// Independent switches controlling how an output tree is written.
///
/// Idempotent re-runs use `overwrite_symlinks = true` with
/// `fail_if_not_empty = false`; the defaults suit one-shot generation into a
/// fresh directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializePolicy {
    /// Replace an existing symlink at a leaf target. Real directories are never touched.
    #[serde(default)]
    pub overwrite_symlinks: bool,

    /// Report every action without touching the filesystem.
    #[serde(default)]
    pub simulate: bool,

    /// Refuse to write into an output directory that already has entries.
    #[serde(default = "default_true")]
    pub fail_if_not_empty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MaterializePolicy {
    fn default() -> Self {
        Self {
            overwrite_symlinks: false,
            simulate: false,
            fail_if_not_empty: default_true(),
        }
    }
}

impl MaterializePolicy {
    /// Policy for regenerating an existing output in place.
    pub fn rerun() -> Self {
        Self {
            overwrite_symlinks: true,
            simulate: false,
            fail_if_not_empty: false,
        }
    }

    pub fn simulated(self) -> Self {
        Self {
            simulate: true,
            ..self
        }
    }
}
