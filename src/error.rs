//! Error types for the mirror tree builder.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed, reported alongside the offending path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    ReadMetadata,
    ReadDirectory,
    CreateDirectory,
    CreateSymlink,
    RemoveSymlink,
    ResolvePath,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FsOperation::ReadMetadata => "read metadata",
            FsOperation::ReadDirectory => "read directory",
            FsOperation::CreateDirectory => "create directory",
            FsOperation::CreateSymlink => "create symlink",
            FsOperation::RemoveSymlink => "remove symlink",
            FsOperation::ResolvePath => "resolve path",
        };
        f.write_str(name)
    }
}

/// Broad error classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad inputs, detected before any filesystem mutation.
    Configuration,
    /// Output tree is not in a state that can be materialized into.
    Precondition,
    /// An underlying filesystem call failed.
    Filesystem,
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Invalid depth {0}: depth must be at least 1")]
    InvalidDepth(usize),

    #[error("No output directory specified: pass --output-high and/or --output-low")]
    NoOutput,

    #[error("High and low outputs resolve to the same directory: {}", .0.display())]
    SameOutput(PathBuf),

    #[error(
        "Output {} lies inside output {}: one tree would be written into the other",
        inner.display(),
        outer.display()
    )]
    NestedOutputs { outer: PathBuf, inner: PathBuf },

    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output directory is not empty: {}", .0.display())]
    OutputNotEmpty(PathBuf),

    #[error("Output path exists and is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    #[error("Cannot populate {}: path exists and is not a real directory", .0.display())]
    IntermediateNotDirectory(PathBuf),

    #[error("Failed to {op} {}: {source}", path.display())]
    Filesystem {
        op: FsOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl MirrorError {
    /// Wrap an I/O error with the operation and path it came from.
    pub fn fs(op: FsOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MirrorError::InvalidDepth(_)
            | MirrorError::NoOutput
            | MirrorError::SameOutput(_)
            | MirrorError::NestedOutputs { .. }
            | MirrorError::SourceNotDirectory(_)
            | MirrorError::Config(_) => ErrorCategory::Configuration,
            MirrorError::OutputNotEmpty(_)
            | MirrorError::OutputNotDirectory(_)
            | MirrorError::IntermediateNotDirectory(_) => ErrorCategory::Precondition,
            MirrorError::Filesystem { .. } | MirrorError::Walk { .. } => {
                ErrorCategory::Filesystem
            }
        }
    }
}

impl From<config::ConfigError> for MirrorError {
    fn from(err: config::ConfigError) -> Self {
        MirrorError::Config(err.to_string())
    }
}
