//! Walker depth bound against nested trees

use super::test_utils::make_dirs;
use mmirror::walk;
use tempfile::TempDir;

#[test]
fn test_depth_bound_on_deep_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    make_dirs(root, &["a/b/c/d", "a/e", "f/g/h"]);

    for depth in 1..=4 {
        let descriptors = walk(root, depth, false).unwrap();
        assert!(!descriptors.is_empty());
        for descriptor in &descriptors {
            let segments = descriptor.segment_count();
            assert!(segments <= depth, "{:?} deeper than {}", descriptor, depth);
            assert_eq!(descriptor.at_depth(), segments == depth);
            assert!(!descriptor.relative_path().has_root());
        }
    }
}

#[test]
fn test_files_never_become_descriptors() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    make_dirs(root, &["a"]);
    std::fs::write(root.join("a").join("song.flac"), "x").unwrap();
    std::fs::write(root.join("notes.txt"), "x").unwrap();

    let descriptors = walk(root, 3, false).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert!(!descriptors[0].at_depth());
}
