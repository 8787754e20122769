//! Integration tests for mirror tree building

mod mirror_end_to_end;
mod rerun_policy;
mod test_utils;
mod walk_depth;
