//! Directory descriptors produced by the walker and consumed by the materializer

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A directory discovered under a walk root.
///
/// Descriptors are plain values: built once by the walker, never mutated, and
/// dropped after materialization. Identity for merging is the relative path
/// only; see [`crate::tree::merge::merge_by`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryDescriptor {
    absolute_path: PathBuf,
    relative_path: PathBuf,
    at_depth: bool,
}

impl DirectoryDescriptor {
    pub fn new(absolute_path: PathBuf, relative_path: PathBuf, at_depth: bool) -> Self {
        Self {
            absolute_path,
            relative_path,
            at_depth,
        }
    }

    /// Resolved path of the source directory.
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Path relative to the walk root, without a leading separator.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// True when this directory sits at the configured depth and is linked
    /// rather than recreated.
    pub fn at_depth(&self) -> bool {
        self.at_depth
    }

    /// Number of path segments in the relative path.
    pub fn segment_count(&self) -> usize {
        self.relative_path.components().count()
    }
}

/// Merge key: the relative path.
pub fn relative_key(descriptor: &DirectoryDescriptor) -> PathBuf {
    descriptor.relative_path.clone()
}
