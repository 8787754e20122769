//! mmirror CLI Binary
//!
//! Command-line interface for building symlink mirror trees from a high and a
//! low quality source.

use clap::Parser;
use mmirror::cli::{exit_code, map_error, Cli, RunContext};
use mmirror::config::{ConfigLoader, MmirrorConfig};
use mmirror::logging::{init_logging, level_for_verbosity, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(exit_code(&e));
    }

    let context = RunContext::new(config);
    match context.execute(&cli) {
        Ok(output) => {
            info!("Run completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &MmirrorConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if let Some(level) = level_for_verbosity(cli.verbose) {
        logging.level = level.to_string();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }

    logging
}
