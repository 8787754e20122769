//! Depth-limited directory walker

use crate::error::{FsOperation, MirrorError};
use crate::tree::descriptor::DirectoryDescriptor;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Levels below the root to descend; directories found at this level are leaves
    pub depth: usize,
    /// Whether to descend through symbolic links
    pub follow_symlinks: bool,
}

/// Directory walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect directory descriptors.
    ///
    /// Descriptors come out in pre-order (a directory before its descendants)
    /// following the directory listing order; nothing is sorted here. Plain
    /// files are ignored. Symlinked directories are skipped unless
    /// `follow_symlinks` is set. A followed link that loops back to an
    /// ancestor is still reported and descended through until the depth
    /// bound; a followed link that points nowhere is skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root.display(), depth = self.config.depth))]
    pub fn walk(&self) -> Result<Vec<DirectoryDescriptor>, MirrorError> {
        let depth = self.config.depth;
        if depth < 1 {
            return Err(MirrorError::InvalidDepth(depth));
        }

        let metadata = std::fs::metadata(&self.root)
            .map_err(|e| MirrorError::fs(FsOperation::ReadMetadata, &self.root, e))?;
        if !metadata.is_dir() {
            return Err(MirrorError::SourceNotDirectory(self.root.clone()));
        }

        let start = Instant::now();
        let mut descriptors = Vec::new();
        self.collect(&self.root, Path::new(""), depth, &mut descriptors)?;

        info!(
            directories = descriptors.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Walk complete"
        );

        Ok(descriptors)
    }

    /// Collect directories up to `remaining` levels below `dir`, naming them
    /// relative to the walk root through `prefix`.
    fn collect(
        &self,
        dir: &Path,
        prefix: &Path,
        remaining: usize,
        descriptors: &mut Vec<DirectoryDescriptor>,
    ) -> Result<(), MirrorError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(remaining)
            .follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if self.config.follow_symlinks && err.loop_ancestor().is_some() => {
                    // walkdir will not enter a link back to an ancestor. Record
                    // it and descend with what is left of the depth.
                    let Some(path) = err.path().map(Path::to_path_buf) else {
                        return Err(MirrorError::Walk {
                            path: dir.to_path_buf(),
                            source: err,
                        });
                    };
                    let level = err.depth();
                    let relative_path = prefix.join(relative_to(&path, dir)?);
                    debug!(
                        relative = %relative_path.display(),
                        at_depth = level == remaining,
                        "Found directory through looping symlink"
                    );
                    descriptors.push(DirectoryDescriptor::new(
                        path.clone(),
                        relative_path.clone(),
                        level == remaining,
                    ));
                    if level < remaining {
                        self.collect(&path, &relative_path, remaining - level, descriptors)?;
                    }
                    continue;
                }
                Err(err) if self.config.follow_symlinks && is_dangling_link(&err) => {
                    warn!(
                        path = ?err.path(),
                        error = %err,
                        "Skipping symlink that cannot be followed"
                    );
                    continue;
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    return Err(MirrorError::Walk { path, source: err });
                }
            };

            // With follow_links off a symlinked directory reports a symlink
            // file type and is dropped here along with plain files.
            if !entry.file_type().is_dir() {
                trace!(path = %entry.path().display(), "Ignoring non-directory entry");
                continue;
            }

            let relative_path = prefix.join(relative_to(entry.path(), dir)?);
            let at_depth = entry.depth() == remaining;

            debug!(
                relative = %relative_path.display(),
                at_depth,
                "Found directory"
            );
            descriptors.push(DirectoryDescriptor::new(
                entry.path().to_path_buf(),
                relative_path,
                at_depth,
            ));
        }

        Ok(())
    }
}

/// Walk `root` to `depth` levels.
pub fn walk(
    root: &Path,
    depth: usize,
    follow_symlinks: bool,
) -> Result<Vec<DirectoryDescriptor>, MirrorError> {
    Walker::with_config(
        root.to_path_buf(),
        WalkerConfig {
            depth,
            follow_symlinks,
        },
    )
    .walk()
}

fn relative_to<'a>(path: &'a Path, base: &Path) -> Result<&'a Path, MirrorError> {
    path.strip_prefix(base).map_err(|e| {
        MirrorError::fs(
            FsOperation::ResolvePath,
            path,
            std::io::Error::new(std::io::ErrorKind::Other, e),
        )
    })
}

/// A followed symlink whose target is gone.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false);
    not_found
        && err
            .path()
            .and_then(|p| std::fs::symlink_metadata(p).ok())
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
}
