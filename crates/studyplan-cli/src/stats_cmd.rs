//! `studyplan stats` command: estimated time and priority breakdown.

use anyhow::Result;

use studyplan_core::models::{Plan, Priority};
use studyplan_core::stats::PlanStats;

use crate::resolve::resolve_phase;

/// Run the stats command, for the whole plan or a single phase.
pub fn run_stats(plan: &Plan, phase: Option<&str>) -> Result<()> {
    let stats = match phase {
        Some(id) => PlanStats::from_phases([resolve_phase(plan, id)?]),
        None => PlanStats::from_plan(plan),
    };

    println!(
        "{:<20} {:>5} {:>6} {:>8} {:>5} {:>5} {:>5}",
        "PHASE", "DAYS", "TASKS", "HOURS", "HIGH", "MED", "LOW"
    );
    println!("{}", "-".repeat(76));

    for p in &stats.phases {
        println!(
            "{:<20} {:>5} {:>6} {:>8.1} {:>5} {:>5} {:>5}",
            p.id,
            p.days,
            p.tasks,
            p.hours(),
            p.priorities.high,
            p.priorities.medium,
            p.priorities.low,
        );
    }

    if stats.phases.len() > 1 {
        println!("{}", "-".repeat(76));
        println!(
            "{:<20} {:>5} {:>6} {:>8.1} {:>5} {:>5} {:>5}",
            "total",
            stats.days,
            stats.tasks,
            stats.hours(),
            stats.priorities.high,
            stats.priorities.medium,
            stats.priorities.low,
        );
    }
    println!();

    let avg = if stats.days > 0 {
        stats.est_minutes as f64 / stats.days as f64
    } else {
        0.0
    };
    println!("Average per day:    {avg:.0} min");
    println!(
        "Tasks with details: {} of {}",
        stats.tasks_with_details, stats.tasks
    );
    println!(
        "Tasks with links:   {} of {}",
        stats.tasks_with_links, stats.tasks
    );

    for priority in Priority::ALL {
        let days = stats.priorities.get(priority);
        let pct = if stats.days > 0 {
            days as f64 * 100.0 / stats.days as f64
        } else {
            0.0
        };
        println!("{:<8} days: {days:>4} ({pct:.1}%)", priority.to_string());
    }
    Ok(())
}
