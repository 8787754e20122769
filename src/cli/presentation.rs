//! CLI presentation: run summary formatters (text table and JSON).

use crate::error::MirrorError;
use crate::materialize::{MaterializeAction, SkipReason};
use crate::mirror::MirrorSummary;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub fn format_summary_text(summary: &MirrorSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Output",
        "Favors",
        "Dirs created",
        "Links created",
        "Links replaced",
        "Skipped",
        "Simulated",
    ]);
    for output in &summary.outputs {
        let counts = output.report.counts();
        table.add_row(vec![
            output.output.display().to_string(),
            output.favor.to_string(),
            counts.directories_created.to_string(),
            counts.links_created.to_string(),
            counts.links_replaced.to_string(),
            counts.skipped.to_string(),
            if output.report.simulated { "yes" } else { "no" }.to_string(),
        ]);
    }

    let mut text = table.to_string();
    let skipped: Vec<String> = summary
        .outputs
        .iter()
        .flat_map(|o| o.report.actions.iter())
        .filter_map(|action| match action {
            MaterializeAction::Skip { path, reason } => {
                Some(format!("  - {} ({})", path.display(), skip_label(*reason)))
            }
            _ => None,
        })
        .collect();
    if !skipped.is_empty() {
        text.push_str(&format!("\n\nSkipped ({}):\n", skipped.len()));
        text.push_str(&skipped.join("\n"));
    }
    text
}

pub fn format_summary_json(summary: &MirrorSummary) -> Result<String, MirrorError> {
    let outputs: Vec<_> = summary
        .outputs
        .iter()
        .map(|o| {
            serde_json::json!({
                "output": o.output,
                "favor": o.favor,
                "simulated": o.report.simulated,
                "counts": o.report.counts(),
                "actions": o.report.actions,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "outputs": outputs }))
        .map_err(|e| MirrorError::Config(format!("Failed to render summary: {}", e)))
}

fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NotSymlink => "not a symlink",
        SkipReason::OverwriteDisabled => "overwrite disabled",
    }
}
