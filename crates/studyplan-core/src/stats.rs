//! Estimated-effort totals per phase and for the whole plan.

use serde::Serialize;

use crate::models::{Day, Phase, Plan, Priority};

/// Sum of a day's task estimates, in minutes.
pub fn day_minutes(day: &Day) -> u64 {
    day.tasks.iter().map(|t| u64::from(t.est_minutes)).sum()
}

/// Day counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    fn add(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    pub id: String,
    pub title: String,
    pub days: usize,
    pub tasks: usize,
    pub est_minutes: u64,
    pub priorities: PriorityCounts,
    pub tasks_with_details: usize,
    pub tasks_with_links: usize,
}

impl PhaseStats {
    pub fn from_phase(phase: &Phase) -> Self {
        let mut stats = Self {
            id: phase.id.clone(),
            title: phase.title.clone(),
            days: phase.days.len(),
            tasks: 0,
            est_minutes: 0,
            priorities: PriorityCounts::default(),
            tasks_with_details: 0,
            tasks_with_links: 0,
        };
        for day in &phase.days {
            stats.priorities.add(day.priority);
            stats.est_minutes += day_minutes(day);
            stats.tasks += day.tasks.len();
            stats.tasks_with_details += day.tasks.iter().filter(|t| t.details.is_some()).count();
            stats.tasks_with_links += day
                .tasks
                .iter()
                .filter(|t| !t.resource_links.is_empty())
                .count();
        }
        stats
    }

    /// Estimated hours, rounded to one decimal.
    pub fn hours(&self) -> f64 {
        minutes_to_hours(self.est_minutes)
    }

    /// Mean minutes per day.
    pub fn avg_day_minutes(&self) -> u64 {
        if self.days == 0 {
            0
        } else {
            self.est_minutes / self.days as u64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub phases: Vec<PhaseStats>,
    pub days: usize,
    pub tasks: usize,
    pub est_minutes: u64,
    pub priorities: PriorityCounts,
    pub tasks_with_details: usize,
    pub tasks_with_links: usize,
}

impl PlanStats {
    pub fn from_plan(plan: &Plan) -> Self {
        Self::from_phases(&plan.phases)
    }

    pub fn from_phases<'a, I>(phases: I) -> Self
    where
        I: IntoIterator<Item = &'a Phase>,
    {
        let phases: Vec<PhaseStats> = phases.into_iter().map(PhaseStats::from_phase).collect();
        let mut priorities = PriorityCounts::default();
        for p in &phases {
            priorities.high += p.priorities.high;
            priorities.medium += p.priorities.medium;
            priorities.low += p.priorities.low;
        }
        Self {
            days: phases.iter().map(|p| p.days).sum(),
            tasks: phases.iter().map(|p| p.tasks).sum(),
            est_minutes: phases.iter().map(|p| p.est_minutes).sum(),
            tasks_with_details: phases.iter().map(|p| p.tasks_with_details).sum(),
            tasks_with_links: phases.iter().map(|p| p.tasks_with_links).sum(),
            priorities,
            phases,
        }
    }

    pub fn hours(&self) -> f64 {
        minutes_to_hours(self.est_minutes)
    }
}

fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}
