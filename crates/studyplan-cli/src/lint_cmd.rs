//! `studyplan lint` command: check task `details` fragments.

use anyhow::{Result, bail};
use tracing::warn;

use studyplan_core::details::{LintConfig, LintReport, lint_phases, lint_plan};
use studyplan_core::models::Plan;

use crate::resolve::resolve_phase;

/// Run the lint command. Fails when any issue is found.
pub fn run_lint(plan: &Plan, phase: Option<&str>, config: &LintConfig) -> Result<()> {
    let report = match phase {
        Some(id) => lint_phases([resolve_phase(plan, id)?], config),
        None => lint_plan(plan, config),
    };

    print_summaries(&report);

    if report.is_clean() {
        println!("No issues (min {} words, {} links).", config.min_words, config.min_links);
        return Ok(());
    }

    println!();
    println!("{:>4} {:>4}  {:<40} ISSUE", "DAY", "TASK", "LABEL");
    println!("{}", "-".repeat(76));
    for issue in &report.issues {
        println!(
            "{:>4} {:>4}  {:<40} {}",
            issue.global_day,
            issue.task_index,
            truncate(&issue.label, 40),
            issue.kind
        );
    }

    warn!(issues = report.issues.len(), "detail lint found issues");
    bail!("{} detail issue(s) found", report.issues.len())
}

fn print_summaries(report: &LintReport) {
    println!(
        "{:<20} {:>6} {:>8} {:>6} {:>6} {:>6} {:>6}",
        "PHASE", "TASKS", "DETAILS", "MIN", "MAX", "AVG", "ISSUES"
    );
    println!("{}", "-".repeat(76));
    for s in &report.summaries {
        let words = |w: Option<usize>| w.map_or_else(|| "-".to_string(), |w| w.to_string());
        let avg = s
            .avg_words()
            .map_or_else(|| "-".to_string(), |a| format!("{a:.0}"));
        println!(
            "{:<20} {:>6} {:>8} {:>6} {:>6} {:>6} {:>6}",
            s.phase_id,
            s.total_tasks,
            s.tasks_with_details,
            words(s.min_words),
            words(s.max_words),
            avg,
            s.issues,
        );
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
