//! Read-only views of the plan.
//!
//! Implements:
//! - `studyplan phases`        -- table of phases
//! - `studyplan phase <id>`    -- one phase, one line per day
//! - `studyplan day <n>`       -- one day with its tasks
//! - `studyplan week <n>`      -- the days of a calendar week

use anyhow::{Result, bail};

use studyplan_core::details::word_count;
use studyplan_core::export::DayView;
use studyplan_core::models::{Day, Phase, Plan};
use studyplan_core::query::{days_in_week, task_key};
use studyplan_core::stats::{PhaseStats, day_minutes};

// -----------------------------------------------------------------------
// studyplan phases
// -----------------------------------------------------------------------

pub fn run_phases(plan: &Plan) -> Result<()> {
    println!("{}", plan.title);
    println!();
    println!(
        "{:<3} {:<20} {:>5} {:<8} {:>7}  TITLE",
        "#", "ID", "DAYS", "WEEKS", "HOURS"
    );
    println!("{}", "-".repeat(76));

    for (i, phase) in plan.phases.iter().enumerate() {
        let stats = PhaseStats::from_phase(phase);
        println!(
            "{:<3} {:<20} {:>5} {:<8} {:>7.1}  {}",
            i + 1,
            phase.id,
            stats.days,
            week_span(&phase.weeks),
            stats.hours(),
            phase.title,
        );
    }

    println!();
    println!(
        "{} phases, {} days, {} tasks",
        plan.phases.len(),
        plan.total_days,
        plan.task_count()
    );
    Ok(())
}

// -----------------------------------------------------------------------
// studyplan phase <id>
// -----------------------------------------------------------------------

pub fn run_phase(phase: &Phase) -> Result<()> {
    println!("{} ({})", phase.title, phase.id);
    println!("{}", phase.duration);
    if !phase.description.is_empty() {
        println!("{}", phase.description);
    }
    println!();

    print_day_header();
    for day in &phase.days {
        print_day_row(day);
    }
    Ok(())
}

// -----------------------------------------------------------------------
// studyplan day <n>
// -----------------------------------------------------------------------

pub fn run_day(phase: &Phase, day: &Day, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&DayView::from(day))?);
        return Ok(());
    }

    println!("Day {}: {}", day.global_day, day.title);
    println!("  Phase:    {} ({})", phase.id, phase.title);
    println!("  Week:     {}", day.week);
    println!("  Priority: {}", day.priority);
    println!("  Minutes:  {}", day_minutes(day));
    println!();

    println!("Tasks:");
    for (i, task) in day.tasks.iter().enumerate() {
        println!("  [{i}] {} ({} min)", task.label, task.est_minutes);
        println!("      key:      {}", task_key(&phase.id, day.global_day, i));
        for link in &task.resource_links {
            println!("      link:     {link}");
        }
        if let Some(notebook) = &task.notebook {
            println!("      notebook: {notebook}");
        }
        if let Some(artifact) = &task.artifact {
            println!("      artifact: {artifact}");
        }
        if let Some(criteria) = &task.success_criteria {
            println!("      success:  {criteria}");
        }
        if let Some(details) = &task.details {
            println!("      details:  {} words", word_count(details));
        }
    }

    if let Some(prompt) = &day.reflection_prompt {
        println!();
        println!("Reflection: {prompt}");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// studyplan week <n>
// -----------------------------------------------------------------------

pub fn run_week(plan: &Plan, week: u32) -> Result<()> {
    let days = days_in_week(plan, week);
    if days.is_empty() {
        let last = plan.days().map(|(_, d)| d.week).max().unwrap_or(0);
        bail!("week {week} has no days; the plan covers weeks 1-{last}");
    }

    println!("Week {week}");
    println!();
    print_day_header();
    let mut current_phase = "";
    for (phase, day) in days {
        if phase.id != current_phase {
            println!("[{}]", phase.id);
            current_phase = &phase.id;
        }
        print_day_row(day);
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn print_day_header() {
    println!(
        "{:>4} {:>4} {:<8} {:>5} {:>7}  TITLE",
        "DAY", "WEEK", "PRIORITY", "TASKS", "MINUTES"
    );
    println!("{}", "-".repeat(76));
}

fn print_day_row(day: &Day) {
    println!(
        "{:>4} {:>4} {:<8} {:>5} {:>7}  {}",
        day.global_day,
        day.week,
        day.priority.to_string(),
        day.tasks.len(),
        day_minutes(day),
        day.title,
    );
}

/// `"1-6"` for a multi-week span, `"7"` for a single week.
fn week_span(weeks: &[u32]) -> String {
    match (weeks.first(), weeks.last()) {
        (Some(a), Some(b)) if a == b => a.to_string(),
        (Some(a), Some(b)) => format!("{a}-{b}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_span_formats() {
        assert_eq!(week_span(&[1, 2, 3]), "1-3");
        assert_eq!(week_span(&[7]), "7");
        assert_eq!(week_span(&[]), "-");
    }

    #[test]
    fn week_beyond_plan_is_an_error() {
        let err = run_week(studyplan_core::catalog::plan(), 53).unwrap_err();
        assert_eq!(
            err.to_string(),
            "week 53 has no days; the plan covers weeks 1-52"
        );
    }
}
