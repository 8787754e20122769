//! mmirror: Symlink Mirror Trees
//!
//! Merges a "high" and a "low" quality directory tree that partially overlap
//! into output trees made of symbolic links. Each output favors one source on
//! conflicts and takes the non-overlapping entries of the other.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod mirror;
pub mod tree;

pub use error::{ErrorCategory, MirrorError};
pub use materialize::{materialize, MaterializePolicy, MaterializeReport};
pub use mirror::{run, Favor, MirrorRequest, MirrorSummary};
pub use tree::merge::{merge, merge_by};
pub use tree::walker::walk;
pub use tree::DirectoryDescriptor;
