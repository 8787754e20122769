//! Property-based tests for merge precedence, completeness and ordering

use mmirror::{merge, DirectoryDescriptor};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn relative_paths() -> impl Strategy<Value = BTreeSet<PathBuf>> {
    let segment = prop::sample::select(vec!["a", "b", "a-b", "a.b", "ab", "c"]);
    let path = prop::collection::vec(segment, 1..=3)
        .prop_map(|segments| segments.iter().collect::<PathBuf>());
    prop::collection::btree_set(path, 0..24)
}

fn descriptors(root: &str, paths: &BTreeSet<PathBuf>) -> Vec<DirectoryDescriptor> {
    paths
        .iter()
        .map(|rel| {
            DirectoryDescriptor::new(Path::new(root).join(rel), rel.clone(), rel.components().count() == 3)
        })
        .collect()
}

proptest! {
    #[test]
    fn merge_prefers_primary(a in relative_paths(), b in relative_paths()) {
        let merged = merge(descriptors("/high", &a), descriptors("/low", &b));

        for descriptor in &merged {
            let rel = descriptor.relative_path();
            if a.contains(rel) {
                prop_assert!(descriptor.absolute_path().starts_with("/high"));
            } else {
                prop_assert!(descriptor.absolute_path().starts_with("/low"));
            }
        }
    }

    #[test]
    fn merge_is_complete(a in relative_paths(), b in relative_paths()) {
        let merged = merge(descriptors("/high", &a), descriptors("/low", &b));

        let overlap = b.iter().filter(|p| a.contains(*p)).count();
        prop_assert_eq!(merged.len(), a.len() + b.len() - overlap);

        let keys: BTreeSet<PathBuf> = merged.iter().map(|d| d.relative_path().to_path_buf()).collect();
        let union: BTreeSet<PathBuf> = a.union(&b).cloned().collect();
        prop_assert_eq!(keys, union);
    }

    #[test]
    fn merge_orders_parents_first(a in relative_paths(), b in relative_paths()) {
        let merged = merge(descriptors("/high", &a), descriptors("/low", &b));

        for (i, current) in merged.iter().enumerate() {
            for before in &merged[..i] {
                // Nothing ahead of an entry may be one of its descendants.
                prop_assert!(!before.relative_path().starts_with(current.relative_path()));
            }
        }
    }

    #[test]
    fn merge_is_deterministic(a in relative_paths(), b in relative_paths()) {
        let first = merge(descriptors("/high", &a), descriptors("/low", &b));
        let second = merge(descriptors("/high", &a), descriptors("/low", &b));
        prop_assert_eq!(first, second);
    }
}
