//! Source tree scanning and merging
//!
//! Walks a source root to a fixed depth, producing directory descriptors, and
//! merges the descriptors of two sources with one of them taking precedence.

pub mod descriptor;
pub mod merge;
pub mod path;
pub mod walker;

pub use descriptor::DirectoryDescriptor;
