//! CLI parse: clap types for mmirror. No behavior; definitions only.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// mmirror - merge a high and a low quality directory tree into symlink mirrors
#[derive(Parser, Debug)]
#[command(name = "mmirror", version)]
#[command(about = "Merge two overlapping directory trees into symlink mirror trees")]
pub struct Cli {
    /// High quality source directory
    #[arg(required_unless_present = "print_config")]
    pub source_high: Option<PathBuf>,

    /// Low quality source directory
    #[arg(required_unless_present = "print_config")]
    pub source_low: Option<PathBuf>,

    /// Output tree favoring the high source
    #[arg(short = 'H', long)]
    pub output_high: Option<PathBuf>,

    /// Output tree favoring the low source
    #[arg(short = 'L', long)]
    pub output_low: Option<PathBuf>,

    /// Directory levels to walk before linking (default: 1, or from config)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Descend through symlinked directories in the sources
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Replace symlinks already present in the outputs
    #[arg(long)]
    pub overwrite_symlinks: bool,

    /// Allow writing into output directories that already have entries
    #[arg(long)]
    pub allow_non_empty: bool,

    /// Report what would be done without touching the filesystem
    #[arg(short = 'n', long)]
    pub simulate: bool,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging verbosity, -vv for very verbose
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
