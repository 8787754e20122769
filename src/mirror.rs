//! Mirror driver
//!
//! Validates a request, walks both sources once, then merges and materializes
//! each requested output with its favored source as primary.

use crate::error::MirrorError;
use crate::materialize::{materialize, MaterializePolicy, MaterializeReport};
use crate::tree::merge::merge;
use crate::tree::path::{resolve_existing, resolve_output};
use crate::tree::walker::{Walker, WalkerConfig};
use crate::tree::DirectoryDescriptor;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Which source wins conflicts in an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Favor {
    High,
    Low,
}

impl fmt::Display for Favor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Favor::High => f.write_str("high"),
            Favor::Low => f.write_str("low"),
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct MirrorRequest {
    pub source_high: PathBuf,
    pub source_low: PathBuf,
    pub output_high: Option<PathBuf>,
    pub output_low: Option<PathBuf>,
    pub depth: usize,
    pub follow_symlinks: bool,
    pub policy: MaterializePolicy,
}

impl MirrorRequest {
    pub fn new(source_high: impl Into<PathBuf>, source_low: impl Into<PathBuf>) -> Self {
        Self {
            source_high: source_high.into(),
            source_low: source_low.into(),
            output_high: None,
            output_low: None,
            depth: 1,
            follow_symlinks: false,
            policy: MaterializePolicy::default(),
        }
    }

    /// Check inputs before anything touches the filesystem.
    ///
    /// Returns the resolved request: sources canonicalized, outputs made
    /// absolute. Outputs must be distinct and neither may contain the other.
    pub fn validate(&self) -> Result<MirrorRequest, MirrorError> {
        if self.depth < 1 {
            return Err(MirrorError::InvalidDepth(self.depth));
        }
        if self.output_high.is_none() && self.output_low.is_none() {
            return Err(MirrorError::NoOutput);
        }

        let output_high = self.output_high.as_deref().map(resolve_output).transpose()?;
        let output_low = self.output_low.as_deref().map(resolve_output).transpose()?;
        if let (Some(high), Some(low)) = (&output_high, &output_low) {
            if high == low {
                return Err(MirrorError::SameOutput(high.clone()));
            }
            if high.starts_with(low) || low.starts_with(high) {
                let (outer, inner) = if high.starts_with(low) {
                    (low, high)
                } else {
                    (high, low)
                };
                return Err(MirrorError::NestedOutputs {
                    outer: outer.clone(),
                    inner: inner.clone(),
                });
            }
        }

        Ok(MirrorRequest {
            source_high: resolve_source(&self.source_high)?,
            source_low: resolve_source(&self.source_low)?,
            output_high,
            output_low,
            depth: self.depth,
            follow_symlinks: self.follow_symlinks,
            policy: self.policy,
        })
    }

    fn outputs(&self) -> impl Iterator<Item = (Favor, &Path)> {
        self.output_high
            .as_deref()
            .map(|p| (Favor::High, p))
            .into_iter()
            .chain(self.output_low.as_deref().map(|p| (Favor::Low, p)))
    }
}

fn resolve_source(path: &Path) -> Result<PathBuf, MirrorError> {
    if !path.is_dir() {
        return Err(MirrorError::SourceNotDirectory(path.to_path_buf()));
    }
    resolve_existing(path)
}

/// Result of materializing one output.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSummary {
    pub favor: Favor,
    pub output: PathBuf,
    pub report: MaterializeReport,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MirrorSummary {
    pub outputs: Vec<OutputSummary>,
}

/// Run a mirror request end to end.
///
/// Outputs are produced in order (high, then low); a failure in one stops the
/// run, leaving earlier outputs in place.
#[instrument(skip_all)]
pub fn run(request: &MirrorRequest) -> Result<MirrorSummary, MirrorError> {
    let request = request.validate()?;

    info!(high = %request.source_high.display(), "High source");
    info!(low = %request.source_low.display(), "Low source");

    let high = walk_source(&request, &request.source_high)?;
    let low = walk_source(&request, &request.source_low)?;

    let mut summary = MirrorSummary::default();
    for (favor, output) in request.outputs() {
        info!(%favor, output = %output.display(), "Building output");
        let merged = match favor {
            Favor::High => merge(high.clone(), low.clone()),
            Favor::Low => merge(low.clone(), high.clone()),
        };
        let report = materialize(output, &merged, &request.policy)?;
        summary.outputs.push(OutputSummary {
            favor,
            output: output.to_path_buf(),
            report,
        });
    }

    Ok(summary)
}

fn walk_source(
    request: &MirrorRequest,
    root: &Path,
) -> Result<Vec<DirectoryDescriptor>, MirrorError> {
    Walker::with_config(
        root.to_path_buf(),
        WalkerConfig {
            depth: request.depth,
            follow_symlinks: request.follow_symlinks,
        },
    )
    .walk()
}
