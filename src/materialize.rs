//! Output materialization
//!
//! Turns a merged, parent-before-child descriptor sequence into a tree under an
//! output base: intermediate descriptors become plain directories, descriptors
//! at depth become symbolic links to their source directory.

mod policy;
mod report;

pub use policy::MaterializePolicy;
pub use report::{ActionCounts, MaterializeAction, MaterializeReport, SkipReason};

use crate::error::{FsOperation, MirrorError};
use crate::tree::DirectoryDescriptor;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Materialize `folders` under `base`.
///
/// `folders` must list every parent before its descendants, which the merger's
/// sort guarantees. The non-empty check runs before `base` is created, so a
/// rejected output is left exactly as found. Filesystem failures abort the run
/// and leave whatever was already written in place.
#[instrument(skip_all, fields(base = %base.display(), simulate = policy.simulate))]
pub fn materialize(
    base: &Path,
    folders: &[DirectoryDescriptor],
    policy: &MaterializePolicy,
) -> Result<MaterializeReport, MirrorError> {
    let mut report = MaterializeReport::new(base.to_path_buf(), policy.simulate);

    prepare_base(base, policy, &mut report)?;

    for descriptor in folders {
        let target = base.join(descriptor.relative_path());
        let action = if descriptor.at_depth() {
            link_leaf(&target, descriptor.absolute_path(), policy)?
        } else {
            ensure_directory(&target, policy)?
        };
        report.push(action);
    }

    let counts = report.counts();
    info!(
        links_created = counts.links_created,
        links_replaced = counts.links_replaced,
        directories_created = counts.directories_created,
        skipped = counts.skipped,
        "Materialization complete"
    );

    Ok(report)
}

fn prepare_base(
    base: &Path,
    policy: &MaterializePolicy,
    report: &mut MaterializeReport,
) -> Result<(), MirrorError> {
    match fs::metadata(base) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(MirrorError::OutputNotDirectory(base.to_path_buf()));
            }
            if policy.fail_if_not_empty {
                let mut entries = fs::read_dir(base)
                    .map_err(|e| MirrorError::fs(FsOperation::ReadDirectory, base, e))?;
                if entries.next().is_some() {
                    return Err(MirrorError::OutputNotEmpty(base.to_path_buf()));
                }
            }
            debug!("Output directory already exists");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %base.display(), simulate = policy.simulate, "Creating output directory");
            if !policy.simulate {
                fs::create_dir_all(base)
                    .map_err(|e| MirrorError::fs(FsOperation::CreateDirectory, base, e))?;
            }
            report.push(MaterializeAction::CreateDirectory {
                path: base.to_path_buf(),
            });
            Ok(())
        }
        Err(e) => Err(MirrorError::fs(FsOperation::ReadMetadata, base, e)),
    }
}

fn link_leaf(
    target: &Path,
    source: &Path,
    policy: &MaterializePolicy,
) -> Result<MaterializeAction, MirrorError> {
    // symlink_metadata so that a dangling link still counts as present.
    let existing = match fs::symlink_metadata(target) {
        Ok(metadata) => Some(metadata),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(MirrorError::fs(FsOperation::ReadMetadata, target, e)),
    };

    let Some(metadata) = existing else {
        info!(
            path = %target.display(),
            target = %source.display(),
            simulate = policy.simulate,
            "Creating symlink"
        );
        if !policy.simulate {
            if let Err(e) = create_symlink(source, target) {
                if e.kind() == ErrorKind::AlreadyExists {
                    return Ok(skip(target, skip_reason(target)));
                }
                return Err(MirrorError::fs(FsOperation::CreateSymlink, target, e));
            }
        }
        return Ok(MaterializeAction::CreateLink {
            path: target.to_path_buf(),
            target: source.to_path_buf(),
        });
    };

    if !metadata.file_type().is_symlink() {
        return Ok(skip(target, SkipReason::NotSymlink));
    }
    if !policy.overwrite_symlinks {
        return Ok(skip(target, SkipReason::OverwriteDisabled));
    }

    let previous = fs::read_link(target).ok();
    info!(
        path = %target.display(),
        previous = ?previous,
        target = %source.display(),
        simulate = policy.simulate,
        "Replacing symlink"
    );
    if !policy.simulate {
        remove_symlink(target).map_err(|e| MirrorError::fs(FsOperation::RemoveSymlink, target, e))?;
        create_symlink(source, target)
            .map_err(|e| MirrorError::fs(FsOperation::CreateSymlink, target, e))?;
    }
    Ok(MaterializeAction::ReplaceLink {
        path: target.to_path_buf(),
        previous,
        target: source.to_path_buf(),
    })
}

fn ensure_directory(
    target: &Path,
    policy: &MaterializePolicy,
) -> Result<MaterializeAction, MirrorError> {
    match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.is_dir() => {
            debug!(path = %target.display(), "Directory already exists");
            Ok(MaterializeAction::ExistingDirectory {
                path: target.to_path_buf(),
            })
        }
        // A link here would route everything below it into a source tree.
        Ok(_) => Err(MirrorError::IntermediateNotDirectory(target.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %target.display(), simulate = policy.simulate, "Creating directory");
            if !policy.simulate {
                match fs::create_dir(target) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                    Err(e) => return Err(MirrorError::fs(FsOperation::CreateDirectory, target, e)),
                }
            }
            Ok(MaterializeAction::CreateDirectory {
                path: target.to_path_buf(),
            })
        }
        Err(e) => Err(MirrorError::fs(FsOperation::ReadMetadata, target, e)),
    }
}

fn skip(target: &Path, reason: SkipReason) -> MaterializeAction {
    info!(path = %target.display(), %reason, "Skipping existing target");
    MaterializeAction::Skip {
        path: target.to_path_buf(),
        reason,
    }
}

fn skip_reason(target: &Path) -> SkipReason {
    match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.file_type().is_symlink() => SkipReason::OverwriteDisabled,
        Ok(_) => SkipReason::NotSymlink,
        Err(e) => {
            warn!(path = %target.display(), error = %e, "Target vanished after create race");
            SkipReason::NotSymlink
        }
    }
}

#[cfg(unix)]
fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(source, link)
}

#[cfg(unix)]
fn remove_symlink(link: &Path) -> std::io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_symlink(link: &Path) -> std::io::Result<()> {
    // Directory symlinks on Windows are removed like directories.
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))
}
