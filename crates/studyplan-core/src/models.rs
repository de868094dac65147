//! Curriculum entities: plan, phase, day, task.
//!
//! The structs mirror the on-disk TOML layout (snake_case keys) and are
//! immutable once a plan has been loaded. Ownership is strictly
//! hierarchical: a [`Plan`] owns its [`Phase`]s, which own their [`Day`]s,
//! which own their [`Task`]s.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Importance of a day's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(PriorityParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Priority`] string.
#[derive(Debug, Clone)]
pub struct PriorityParseError(pub String);

impl fmt::Display for PriorityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: {:?} (expected HIGH, MEDIUM, or LOW)", self.0)
    }
}

impl std::error::Error for PriorityParseError {}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The whole curriculum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Display title from the manifest.
    pub title: String,
    /// Number of days the plan covers; global days run `1..=total_days`.
    pub total_days: u32,
    /// Phases in curriculum order.
    pub phases: Vec<Phase>,
}

/// A multi-week block of the curriculum. One phase file on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Stable kebab-case slug, e.g. `foundations`.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Human-readable span, e.g. `42 days (Weeks 1-6)`.
    pub duration: String,
    /// Calendar weeks covered, ascending.
    pub weeks: Vec<u32>,
    #[serde(default)]
    pub days: Vec<Day>,
}

/// One day of study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    /// Position across the whole plan, starting at 1.
    pub global_day: u32,
    /// Calendar week, `(global_day - 1) / 7 + 1`.
    pub week: u32,
    pub title: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_prompt: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A single actionable item within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub label: String,
    /// Estimated effort in minutes.
    pub est_minutes: u32,
    /// Absolute http(s) URLs to external material.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_links: Vec<String>,
    /// Relative path of a notebook the task produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook: Option<String>,
    /// Relative path of an artifact the task produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<String>,
    /// Instructional HTML fragment. Only a subset of the catalog carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Plan {
    /// Iterate every day with its owning phase, in document order.
    pub fn days(&self) -> impl Iterator<Item = (&Phase, &Day)> {
        self.phases
            .iter()
            .flat_map(|phase| phase.days.iter().map(move |day| (phase, day)))
    }

    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(Phase::task_count).sum()
    }
}

impl Phase {
    pub fn task_count(&self) -> usize {
        self.days.iter().map(|d| d.tasks.len()).sum()
    }

    /// First and last global day, if the phase has any days.
    pub fn day_range(&self) -> Option<(u32, u32)> {
        let first = self.days.first()?.global_day;
        let last = self.days.last()?.global_day;
        Some((first, last))
    }
}
