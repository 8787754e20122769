//! Record of what materialization did (or would do, when simulating)

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why a leaf target was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Target exists and is not a symlink.
    NotSymlink,
    /// Target is a symlink but overwriting is disabled.
    OverwriteDisabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSymlink => f.write_str("target exists and is not a symlink"),
            SkipReason::OverwriteDisabled => {
                f.write_str("target is a symlink and overwriting is disabled")
            }
        }
    }
}

/// One step taken for a target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MaterializeAction {
    CreateDirectory { path: PathBuf },
    ExistingDirectory { path: PathBuf },
    CreateLink { path: PathBuf, target: PathBuf },
    ReplaceLink {
        path: PathBuf,
        previous: Option<PathBuf>,
        target: PathBuf,
    },
    Skip { path: PathBuf, reason: SkipReason },
}

/// Per-kind totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub directories_created: usize,
    pub directories_existing: usize,
    pub links_created: usize,
    pub links_replaced: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterializeReport {
    pub base: PathBuf,
    pub simulated: bool,
    pub actions: Vec<MaterializeAction>,
}

impl MaterializeReport {
    pub fn new(base: PathBuf, simulated: bool) -> Self {
        Self {
            base,
            simulated,
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: MaterializeAction) {
        self.actions.push(action);
    }

    pub fn counts(&self) -> ActionCounts {
        let mut counts = ActionCounts::default();
        for action in &self.actions {
            match action {
                MaterializeAction::CreateDirectory { .. } => counts.directories_created += 1,
                MaterializeAction::ExistingDirectory { .. } => counts.directories_existing += 1,
                MaterializeAction::CreateLink { .. } => counts.links_created += 1,
                MaterializeAction::ReplaceLink { .. } => counts.links_replaced += 1,
                MaterializeAction::Skip { .. } => counts.skipped += 1,
            }
        }
        counts
    }
}
