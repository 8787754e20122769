//! Shared test utilities for integration tests

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What sits at a path in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory,
    File,
    Link(PathBuf),
}

/// Create each relative directory under `root`.
pub fn make_dirs(root: &Path, dirs: &[&str]) {
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
}

/// Record every entry under `root` without following links.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Node> {
    let mut nodes = BTreeMap::new();
    if fs::symlink_metadata(root).is_err() {
        return nodes;
    }
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
        let node = if entry.path_is_symlink() {
            Node::Link(fs::read_link(entry.path()).unwrap())
        } else if entry.file_type().is_dir() {
            Node::Directory
        } else {
            Node::File
        };
        nodes.insert(relative, node);
    }
    nodes
}

pub fn link(target: impl Into<PathBuf>) -> Node {
    Node::Link(target.into())
}
