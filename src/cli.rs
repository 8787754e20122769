//! CLI domain: parse, route, output, and presentation only.
//! No mirror logic; the route hands validated inputs to the driver.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, OutputFormat};
pub use presentation::{format_summary_json, format_summary_text};
pub use route::{apply_overrides, RunContext};
