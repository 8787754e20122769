//! End-to-end runs of the mirror driver against real directory trees

#![cfg(unix)]

use super::test_utils::{link, make_dirs, snapshot, Node};
use mmirror::tree::path::resolve_existing;
use mmirror::{run, ErrorCategory, Favor, MirrorError, MirrorRequest};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    root: PathBuf,
    high: PathBuf,
    low: PathBuf,
}

fn fixture(high_dirs: &[&str], low_dirs: &[&str]) -> Fixture {
    let temp = TempDir::new().unwrap();
    let root = resolve_existing(temp.path()).unwrap();
    let high = root.join("high");
    let low = root.join("low");
    make_dirs(&high, high_dirs);
    make_dirs(&low, low_dirs);
    fs::create_dir_all(&high).unwrap();
    fs::create_dir_all(&low).unwrap();
    Fixture {
        _temp: temp,
        root,
        high,
        low,
    }
}

/// Low {a,b,c}, high {b,c,d}, depth 1.
#[test]
fn test_high_output_prefers_high_source() {
    let fx = fixture(&["b", "c", "d"], &["a", "b", "c"]);
    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(fx.root.join("out-high"));

    let summary = run(&request).unwrap();

    let expected: BTreeMap<_, _> = [
        (PathBuf::from("a"), link(fx.low.join("a"))),
        (PathBuf::from("b"), link(fx.high.join("b"))),
        (PathBuf::from("c"), link(fx.high.join("c"))),
        (PathBuf::from("d"), link(fx.high.join("d"))),
    ]
    .into_iter()
    .collect();
    assert_eq!(snapshot(&fx.root.join("out-high")), expected);
    assert_eq!(summary.outputs.len(), 1);
    assert_eq!(summary.outputs[0].favor, Favor::High);
    assert_eq!(summary.outputs[0].report.counts().links_created, 4);
}

#[test]
fn test_both_outputs_favor_their_own_source() {
    let fx = fixture(&["b", "d"], &["a", "b"]);
    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(fx.root.join("out-high"));
    request.output_low = Some(fx.root.join("out-low"));

    let summary = run(&request).unwrap();

    let high_out = snapshot(&fx.root.join("out-high"));
    let low_out = snapshot(&fx.root.join("out-low"));
    assert_eq!(high_out[&PathBuf::from("b")], link(fx.high.join("b")));
    assert_eq!(low_out[&PathBuf::from("b")], link(fx.low.join("b")));
    assert_eq!(high_out.len(), 3);
    assert_eq!(low_out.len(), 3);
    let favors: Vec<_> = summary.outputs.iter().map(|o| o.favor).collect();
    assert_eq!(favors, vec![Favor::High, Favor::Low]);
}

#[test]
fn test_depth_two_builds_real_intermediate_directories() {
    let fx = fixture(
        &["music/artist1", "music/artist2"],
        &["music/artist2", "music/artist3", "video/show"],
    );
    fs::write(fx.high.join("music").join("cover.jpg"), "x").unwrap();
    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(fx.root.join("out"));
    request.depth = 2;

    run(&request).unwrap();

    let out = snapshot(&fx.root.join("out"));
    let expected: BTreeMap<_, _> = [
        (PathBuf::from("music"), Node::Directory),
        (PathBuf::from("music/artist1"), link(fx.high.join("music/artist1"))),
        (PathBuf::from("music/artist2"), link(fx.high.join("music/artist2"))),
        (PathBuf::from("music/artist3"), link(fx.low.join("music/artist3"))),
        (PathBuf::from("video"), Node::Directory),
        (PathBuf::from("video/show"), link(fx.low.join("video/show"))),
    ]
    .into_iter()
    .collect();
    assert_eq!(out, expected);
}

#[test]
fn test_configuration_errors_leave_no_trace() {
    let fx = fixture(&["a"], &["b"]);
    let out = fx.root.join("out");

    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(out.clone());
    request.depth = 0;
    let err = run(&request).unwrap_err();
    assert!(matches!(err, MirrorError::InvalidDepth(0)));
    assert_eq!(err.category(), ErrorCategory::Configuration);

    request.depth = 1;
    request.output_low = Some(out.clone());
    let err = run(&request).unwrap_err();
    assert!(matches!(err, MirrorError::SameOutput(_)));

    assert!(!out.exists());
}

#[test]
fn test_non_empty_output_is_precondition_error() {
    let fx = fixture(&["a"], &["b"]);
    let out = fx.root.join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("keep"), "x").unwrap();

    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(out.clone());

    let err = run(&request).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Precondition);
    assert_eq!(snapshot(&out).len(), 1);
}

#[test]
fn test_simulation_changes_nothing() {
    let fx = fixture(&["a", "b"], &["c"]);
    let out = fx.root.join("out");
    fs::create_dir_all(&out).unwrap();
    fs::create_dir(out.join("a")).unwrap();
    let before = snapshot(&out);

    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(out.clone());
    request.policy.fail_if_not_empty = false;
    request.policy.overwrite_symlinks = true;
    request.policy.simulate = true;

    let summary = run(&request).unwrap();

    assert_eq!(snapshot(&out), before);
    let counts = summary.outputs[0].report.counts();
    assert_eq!(counts.links_created, 2);
    assert_eq!(counts.skipped, 1);
}

#[test]
fn test_symlinked_source_directories_follow_flag() {
    let fx = fixture(&["a"], &[]);
    let external = fx.root.join("external");
    fs::create_dir_all(&external).unwrap();
    std::os::unix::fs::symlink(&external, fx.low.join("linked")).unwrap();

    let mut request = MirrorRequest::new(&fx.high, &fx.low);
    request.output_high = Some(fx.root.join("plain"));
    run(&request).unwrap();
    assert!(!snapshot(&fx.root.join("plain")).contains_key(&PathBuf::from("linked")));

    request.output_high = Some(fx.root.join("followed"));
    request.follow_symlinks = true;
    run(&request).unwrap();
    assert_eq!(
        snapshot(&fx.root.join("followed"))[&PathBuf::from("linked")],
        link(fx.low.join("linked"))
    );
}
