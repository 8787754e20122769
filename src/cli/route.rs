//! CLI route: run context. Folds flags into configuration and dispatches to the mirror driver.

use crate::cli::parse::{Cli, OutputFormat};
use crate::cli::presentation::{format_summary_json, format_summary_text};
use crate::config::{MirrorSettings, MmirrorConfig};
use crate::error::MirrorError;
use crate::mirror::{run, MirrorRequest};
use tracing::info;

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: MmirrorConfig,
}

impl RunContext {
    pub fn new(config: MmirrorConfig) -> Self {
        Self { config }
    }

    /// Execute the command line and return text for stdout.
    pub fn execute(&self, cli: &Cli) -> Result<String, MirrorError> {
        let settings = apply_overrides(cli, &self.config.mirror);

        if cli.print_config {
            let effective = MmirrorConfig {
                mirror: settings,
                logging: self.config.logging.clone(),
            };
            effective.validate()?;
            return effective.to_toml();
        }

        let request = build_request(cli, &settings)?;
        info!(
            depth = request.depth,
            simulate = request.policy.simulate,
            "Starting mirror run"
        );
        let summary = run(&request)?;

        match cli.format {
            OutputFormat::Text => Ok(format_summary_text(&summary)),
            OutputFormat::Json => format_summary_json(&summary),
        }
    }
}

/// Command-line flags take precedence over configured defaults. Boolean
/// flags can only switch a behavior on (or, for `--allow-non-empty`, relax
/// the non-empty check); they never switch a configured behavior off.
pub fn apply_overrides(cli: &Cli, settings: &MirrorSettings) -> MirrorSettings {
    MirrorSettings {
        depth: cli.depth.unwrap_or(settings.depth),
        follow_symlinks: settings.follow_symlinks || cli.follow_symlinks,
        overwrite_symlinks: settings.overwrite_symlinks || cli.overwrite_symlinks,
        fail_if_not_empty: settings.fail_if_not_empty && !cli.allow_non_empty,
        simulate: settings.simulate || cli.simulate,
    }
}

fn build_request(cli: &Cli, settings: &MirrorSettings) -> Result<MirrorRequest, MirrorError> {
    let (Some(source_high), Some(source_low)) = (&cli.source_high, &cli.source_low) else {
        return Err(MirrorError::Config(
            "Both SOURCE_HIGH and SOURCE_LOW are required".to_string(),
        ));
    };

    Ok(MirrorRequest {
        source_high: source_high.clone(),
        source_low: source_low.clone(),
        output_high: cli.output_high.clone(),
        output_low: cli.output_low.clone(),
        depth: settings.depth,
        follow_symlinks: settings.follow_symlinks,
        policy: settings.policy(),
    })
}
