//! `studyplan validate` command: load the plan and report whether it holds.

use anyhow::Result;
use tracing::warn;

use studyplan_core::details::lint_plan;

use crate::config::StudyplanConfig;
use crate::resolve::load_plan;

/// Run the validate command.
///
/// Loading validates the plan, so reaching the summary means it is valid.
/// With `details`, the advisory detail lint runs too; its issues are
/// summarized but do not fail the command.
pub fn run_validate(config: &StudyplanConfig, details: bool) -> Result<()> {
    let plan = load_plan(config)?;

    let source = match &config.plan_dir {
        Some(dir) => dir.display().to_string(),
        None => "embedded plan".to_string(),
    };
    println!("{source}: OK");
    println!("  Title:  {}", plan.title);
    println!("  Phases: {}", plan.phases.len());
    println!("  Days:   {}", plan.total_days);
    println!("  Tasks:  {}", plan.task_count());

    if details {
        let report = lint_plan(&plan, &config.lint);
        let checked: usize = report.summaries.iter().map(|s| s.tasks_with_details).sum();
        println!(
            "  Details: {checked} checked, {} advisory issue(s)",
            report.issues.len()
        );
        if !report.is_clean() {
            warn!(
                issues = report.issues.len(),
                "task details have lint issues; run `studyplan lint` for the full list"
            );
        }
    }

    Ok(())
}
