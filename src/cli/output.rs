//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ErrorCategory, MirrorError};

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &MirrorError) -> String {
    format!("error: {}", e)
}

/// Process exit code for an error, one per error category.
pub fn exit_code(e: &MirrorError) -> i32 {
    match e.category() {
        ErrorCategory::Filesystem => 1,
        ErrorCategory::Configuration => 2,
        ErrorCategory::Precondition => 3,
    }
}
