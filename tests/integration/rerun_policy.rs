//! Regenerating an existing output under the overwrite policy

#![cfg(unix)]

use super::test_utils::{link, make_dirs, snapshot, Node};
use mmirror::tree::path::resolve_existing;
use mmirror::{run, MaterializePolicy, MirrorRequest};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_rerun_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = resolve_existing(temp.path()).unwrap();
    make_dirs(&root.join("high"), &["x/one", "x/two"]);
    make_dirs(&root.join("low"), &["x/two", "y/three"]);

    let mut request = MirrorRequest::new(root.join("high"), root.join("low"));
    request.output_low = Some(root.join("out"));
    request.depth = 2;
    request.policy = MaterializePolicy::rerun();

    run(&request).unwrap();
    let first = snapshot(&root.join("out"));
    let summary = run(&request).unwrap();
    let second = snapshot(&root.join("out"));

    assert_eq!(first, second);
    let counts = summary.outputs[0].report.counts();
    assert_eq!(counts.links_replaced, 3);
    assert_eq!(counts.links_created, 0);
    assert_eq!(counts.directories_existing, 2);
}

#[test]
fn test_rerun_repoints_links_after_source_change() {
    let temp = TempDir::new().unwrap();
    let root = resolve_existing(temp.path()).unwrap();
    let high = root.join("high");
    let low = root.join("low");
    make_dirs(&low, &["album"]);
    fs::create_dir_all(&high).unwrap();

    let mut request = MirrorRequest::new(&high, &low);
    request.output_high = Some(root.join("out"));
    request.policy = MaterializePolicy::rerun();
    run(&request).unwrap();
    assert_eq!(
        snapshot(&root.join("out"))[&PathBuf::from("album")],
        link(low.join("album"))
    );

    // A high quality copy shows up later and takes over the link.
    make_dirs(&high, &["album"]);
    run(&request).unwrap();
    assert_eq!(
        snapshot(&root.join("out"))[&PathBuf::from("album")],
        link(high.join("album"))
    );
}

#[test]
fn test_rerun_without_overwrite_keeps_old_links() {
    let temp = TempDir::new().unwrap();
    let root = resolve_existing(temp.path()).unwrap();
    let high = root.join("high");
    let low = root.join("low");
    make_dirs(&low, &["album"]);
    fs::create_dir_all(&high).unwrap();

    let mut request = MirrorRequest::new(&high, &low);
    request.output_high = Some(root.join("out"));
    request.policy.fail_if_not_empty = false;
    run(&request).unwrap();

    make_dirs(&high, &["album"]);
    let summary = run(&request).unwrap();

    assert_eq!(
        snapshot(&root.join("out"))[&PathBuf::from("album")],
        link(low.join("album"))
    );
    assert_eq!(summary.outputs[0].report.counts().skipped, 1);
}

#[test]
fn test_rerun_never_replaces_real_directories() {
    let temp = TempDir::new().unwrap();
    let root = resolve_existing(temp.path()).unwrap();
    make_dirs(&root.join("high"), &["album"]);
    fs::create_dir_all(root.join("low")).unwrap();
    make_dirs(&root.join("out"), &["album"]);

    let mut request = MirrorRequest::new(root.join("high"), root.join("low"));
    request.output_high = Some(root.join("out"));
    request.policy = MaterializePolicy::rerun();
    run(&request).unwrap();

    assert_eq!(
        snapshot(&root.join("out"))[&PathBuf::from("album")],
        Node::Directory
    );
}
