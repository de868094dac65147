//! Read-only lookups over a [`Plan`].

use serde::Serialize;

use crate::models::{Day, Phase, Plan};

/// Stable identifier of a task: `llmPlan_{phase}_day{n}_task{i}`.
pub fn task_key(phase_id: &str, global_day: u32, task_index: usize) -> String {
    format!("llmPlan_{phase_id}_day{global_day}_task{task_index}")
}

pub fn find_phase<'a>(plan: &'a Plan, id: &str) -> Option<&'a Phase> {
    plan.phases.iter().find(|p| p.id == id)
}

/// Find a day by its global number, together with its phase.
pub fn find_day(plan: &Plan, global_day: u32) -> Option<(&Phase, &Day)> {
    plan.days().find(|(_, d)| d.global_day == global_day)
}

/// All days labelled with calendar week `week`, in order.
pub fn days_in_week(plan: &Plan, week: u32) -> Vec<(&Phase, &Day)> {
    plan.days().filter(|(_, d)| d.week == week).collect()
}

/// A task whose label matched a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMatch<'a> {
    pub phase_id: &'a str,
    pub global_day: u32,
    pub day_title: &'a str,
    pub task_index: usize,
    pub label: &'a str,
    pub key: String,
}

/// Case-insensitive substring search over task labels.
///
/// Restricted to one phase when `phase` is given. A blank query matches
/// nothing.
pub fn search_tasks<'a>(plan: &'a Plan, query: &str, phase: Option<&str>) -> Vec<TaskMatch<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    plan.days()
        .filter(|(p, _)| phase.is_none_or(|id| p.id == id))
        .flat_map(|(p, day)| {
            day.tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.label.to_lowercase().contains(&needle))
                .map(move |(task_index, task)| TaskMatch {
                    phase_id: &p.id,
                    global_day: day.global_day,
                    day_title: &day.title,
                    task_index,
                    label: &task.label,
                    key: task_key(&p.id, day.global_day, task_index),
                })
        })
        .collect()
}
