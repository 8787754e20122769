//! Merging of primary and secondary descriptor sequences

use crate::tree::descriptor::{relative_key, DirectoryDescriptor};
use std::collections::HashSet;
use std::hash::Hash;

/// Merge two descriptor sequences, keyed by relative path.
///
/// Shorthand for [`merge_by`] with [`relative_key`].
pub fn merge(
    primary: Vec<DirectoryDescriptor>,
    secondary: Vec<DirectoryDescriptor>,
) -> Vec<DirectoryDescriptor> {
    merge_by(primary, secondary, relative_key)
}

/// Merge two descriptor sequences using an explicit key function.
///
/// Every primary entry is kept as is. A secondary entry is added only when
/// no primary entry shares its key. The result is sorted by key; with path
/// keys compared segment by segment, a parent always sorts before its
/// descendants, which materialization relies on.
pub fn merge_by<K, F>(
    primary: Vec<DirectoryDescriptor>,
    secondary: Vec<DirectoryDescriptor>,
    key: F,
) -> Vec<DirectoryDescriptor>
where
    K: Ord + Hash,
    F: Fn(&DirectoryDescriptor) -> K,
{
    let taken: HashSet<K> = primary.iter().map(&key).collect();

    let mut merged = primary;
    merged.extend(
        secondary
            .into_iter()
            .filter(|descriptor| !taken.contains(&key(descriptor))),
    );
    merged.sort_by_cached_key(|descriptor| key(descriptor));
    merged
}
