//! `studyplan search` command: find tasks by label.

use anyhow::Result;

use studyplan_core::models::Plan;
use studyplan_core::query::search_tasks;

use crate::resolve::resolve_phase;

/// Run the search command.
pub fn run_search(plan: &Plan, query: &str, phase: Option<&str>) -> Result<()> {
    if let Some(id) = phase {
        resolve_phase(plan, id)?;
    }

    let matches = search_tasks(plan, query, phase);
    if matches.is_empty() {
        println!("No tasks match {query:?}.");
        return Ok(());
    }

    println!("{:>4}  {:<20} {:>4}  LABEL", "DAY", "PHASE", "TASK");
    println!("{}", "-".repeat(76));
    for m in &matches {
        println!(
            "{:>4}  {:<20} {:>4}  {}",
            m.global_day, m.phase_id, m.task_index, m.label
        );
    }
    println!();
    println!("{} match(es)", matches.len());
    Ok(())
}
