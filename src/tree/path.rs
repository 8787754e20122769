//! Path resolution utilities

use crate::error::{FsOperation, MirrorError};
use std::path::{Component, Path, PathBuf};

/// Canonicalize a path that must already exist.
///
/// Resolves symlinks, `..` and `.`; on Windows `dunce` keeps the result free
/// of verbatim `\\?\` prefixes.
pub fn resolve_existing(path: &Path) -> Result<PathBuf, MirrorError> {
    dunce::canonicalize(path).map_err(|e| MirrorError::fs(FsOperation::ResolvePath, path, e))
}

/// Resolve a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are appended, so two spellings of the same output location
/// resolve to the same path.
pub fn resolve_output(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = if path.is_absolute() {
        lexically_normalize(path)
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| MirrorError::fs(FsOperation::ResolvePath, path, e))?;
        lexically_normalize(&cwd.join(path))
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while std::fs::symlink_metadata(existing).is_err() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = resolve_existing(existing)?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Drop `.` components and fold `..` into the preceding component.
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
