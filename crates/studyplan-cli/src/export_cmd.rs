//! `studyplan export` command: serialize the plan as JSON or TOML.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;

use studyplan_core::export::{to_json, to_toml_files, write_plan_dir};
use studyplan_core::models::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// camelCase JSON, one document
    Json,
    /// Plan directory: plan.toml plus one file per phase
    Toml,
}

/// Run the export command.
///
/// JSON goes to `output` as a file, or stdout. TOML goes to `output` as a
/// plan directory, or to stdout as the concatenated files, each preceded
/// by a `# ==> path <==` line.
pub fn run_export(plan: &Plan, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    match format {
        ExportFormat::Json => export_json(plan, output),
        ExportFormat::Toml => export_toml(plan, output),
    }
}

fn export_json(plan: &Plan, output: Option<&Path>) -> Result<()> {
    let json = to_json(plan)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("cannot write output file: {}", path.display()))?;
            println!("Exported {} days to {}", plan.total_days, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn export_toml(plan: &Plan, output: Option<&Path>) -> Result<()> {
    let now = Utc::now();
    match output {
        Some(dir) => {
            let written = write_plan_dir(plan, dir, now)
                .with_context(|| format!("cannot export plan to {}", dir.display()))?;
            println!("Exported {} files to {}", written.len(), dir.display());
        }
        None => {
            let mut out = std::io::stdout().lock();
            for file in to_toml_files(plan, now)? {
                writeln!(out, "# ==> {} <==", file.path)?;
                writeln!(out, "{}", file.contents)?;
            }
        }
    }
    Ok(())
}
