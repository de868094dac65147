//! Structural validation of an assembled [`Plan`].
//!
//! Validation fails fast: the first violated rule is returned. Rules are
//! checked in a fixed order so that a broken plan always reports the most
//! fundamental problem first:
//! - phase list, phase ids, empty phases, titles
//! - global day range, ordering, contiguity, coverage
//! - week membership, phase week lists, durations
//! - resource links, notebook/artifact paths, task labels

use std::collections::HashSet;
use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::models::{Phase, Plan};

static PHASE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid phase id regex"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+) days? \(Weeks? (\d+)(?:-(\d+))?\)$").expect("valid duration regex")
});

/// A violated plan invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanValidationError {
    #[error("plan must contain at least one phase")]
    NoPhases,

    #[error("invalid phase id {0:?} (expected lower-case kebab-case)")]
    InvalidPhaseId(String),

    #[error("duplicate phase id: {0:?}")]
    DuplicatePhaseId(String),

    #[error("phase {0:?} contains no days")]
    EmptyPhase(String),

    #[error("{location} has an empty title")]
    EmptyTitle { location: String },

    #[error("day {global_day} is outside 1..={total_days}")]
    DayOutOfRange { global_day: u32, total_days: u32 },

    #[error("day {0} appears more than once")]
    DuplicateDay(u32),

    #[error("day {found} follows day {previous}; days must be strictly increasing")]
    NonIncreasingDay { previous: u32, found: u32 },

    #[error("expected day {expected} but found day {found}")]
    DayGap { expected: u32, found: u32 },

    #[error("plan ends at day {last} but must cover 1..={total_days}")]
    MissingDays { last: u32, total_days: u32 },

    #[error("day {global_day} is in week {week}, which phase {phase:?} does not list")]
    WeekNotInPhase {
        phase: String,
        global_day: u32,
        week: u32,
    },

    #[error("phase {phase:?} lists weeks {declared:?} but its days cover {actual:?}")]
    PhaseWeeksMismatch {
        phase: String,
        declared: Vec<u32>,
        actual: Vec<u32>,
    },

    #[error("phase {phase:?} has duration {duration:?}: {reason}")]
    DurationMismatch {
        phase: String,
        duration: String,
        reason: String,
    },

    #[error("day {global_day} task {task_index}: invalid resource link {link:?}: {reason}")]
    InvalidResourceLink {
        global_day: u32,
        task_index: usize,
        link: String,
        reason: String,
    },

    #[error("day {global_day} task {task_index}: {field} {path:?} must be a non-empty relative path")]
    InvalidRelativePath {
        global_day: u32,
        task_index: usize,
        field: &'static str,
        path: String,
    },

    #[error("day {global_day} task {task_index} has an empty label")]
    EmptyTaskLabel { global_day: u32, task_index: usize },
}

/// Validate every structural invariant of `plan`.
pub fn validate_plan(plan: &Plan) -> Result<(), PlanValidationError> {
    validate_phases(plan)?;
    validate_day_sequence(plan)?;
    validate_weeks(plan)?;
    for phase in &plan.phases {
        validate_duration(phase)?;
    }
    validate_tasks(plan)?;
    Ok(())
}

/// The canonical duration string for a phase of `days` days over `weeks`.
pub fn format_duration(days: usize, weeks: &[u32]) -> String {
    let unit = if days == 1 { "day" } else { "days" };
    match (weeks.first(), weeks.last()) {
        (Some(a), Some(b)) if a == b => format!("{days} {unit} (Week {a})"),
        (Some(a), Some(b)) => format!("{days} {unit} (Weeks {a}-{b})"),
        _ => format!("{days} {unit}"),
    }
}

fn validate_phases(plan: &Plan) -> Result<(), PlanValidationError> {
    if plan.phases.is_empty() {
        return Err(PlanValidationError::NoPhases);
    }

    let mut seen = HashSet::new();
    for phase in &plan.phases {
        if !PHASE_ID_RE.is_match(&phase.id) {
            return Err(PlanValidationError::InvalidPhaseId(phase.id.clone()));
        }
        if !seen.insert(phase.id.as_str()) {
            return Err(PlanValidationError::DuplicatePhaseId(phase.id.clone()));
        }
    }

    for phase in &plan.phases {
        if phase.days.is_empty() {
            return Err(PlanValidationError::EmptyPhase(phase.id.clone()));
        }
    }

    for phase in &plan.phases {
        if phase.title.trim().is_empty() {
            return Err(PlanValidationError::EmptyTitle {
                location: format!("phase {:?}", phase.id),
            });
        }
        for day in &phase.days {
            if day.title.trim().is_empty() {
                return Err(PlanValidationError::EmptyTitle {
                    location: format!("day {}", day.global_day),
                });
            }
        }
    }

    Ok(())
}

fn validate_day_sequence(plan: &Plan) -> Result<(), PlanValidationError> {
    for (_, day) in plan.days() {
        if day.global_day == 0 || day.global_day > plan.total_days {
            return Err(PlanValidationError::DayOutOfRange {
                global_day: day.global_day,
                total_days: plan.total_days,
            });
        }
    }

    let mut seen = HashSet::new();
    for (_, day) in plan.days() {
        if !seen.insert(day.global_day) {
            return Err(PlanValidationError::DuplicateDay(day.global_day));
        }
    }

    let mut previous = 0u32;
    for (_, day) in plan.days() {
        if day.global_day < previous {
            return Err(PlanValidationError::NonIncreasingDay {
                previous,
                found: day.global_day,
            });
        }
        previous = day.global_day;
    }

    let mut previous = 0u32;
    for (_, day) in plan.days() {
        if day.global_day != previous + 1 {
            return Err(PlanValidationError::DayGap {
                expected: previous + 1,
                found: day.global_day,
            });
        }
        previous = day.global_day;
    }

    // Days are contiguous from 1, so coverage reduces to the last day.
    if previous != plan.total_days {
        return Err(PlanValidationError::MissingDays {
            last: previous,
            total_days: plan.total_days,
        });
    }

    Ok(())
}

fn validate_weeks(plan: &Plan) -> Result<(), PlanValidationError> {
    for (phase, day) in plan.days() {
        if !phase.weeks.contains(&day.week) {
            return Err(PlanValidationError::WeekNotInPhase {
                phase: phase.id.clone(),
                global_day: day.global_day,
                week: day.week,
            });
        }
    }

    for phase in &plan.phases {
        let mut actual: Vec<u32> = phase.days.iter().map(|d| d.week).collect();
        actual.dedup();
        if phase.weeks != actual {
            return Err(PlanValidationError::PhaseWeeksMismatch {
                phase: phase.id.clone(),
                declared: phase.weeks.clone(),
                actual,
            });
        }
    }

    Ok(())
}

fn validate_duration(phase: &Phase) -> Result<(), PlanValidationError> {
    let mismatch = |reason: String| PlanValidationError::DurationMismatch {
        phase: phase.id.clone(),
        duration: phase.duration.clone(),
        reason,
    };

    let caps = DURATION_RE.captures(&phase.duration).ok_or_else(|| {
        mismatch(r#"expected "<N> days (Week <a>)" or "<N> days (Weeks <a>-<b>)""#.to_string())
    })?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let days = number(1).ok_or_else(|| mismatch("day count out of range".to_string()))?;
    if days as usize != phase.days.len() {
        return Err(mismatch(format!("phase has {} days", phase.days.len())));
    }

    let first = number(2).ok_or_else(|| mismatch("week out of range".to_string()))?;
    let last = number(3).unwrap_or(first);
    // Weeks must be exactly `first..=last`; the range itself is never built.
    let contiguous = phase
        .weeks
        .windows(2)
        .all(|w| w[0].checked_add(1) == Some(w[1]));
    if phase.weeks.first() != Some(&first) || phase.weeks.last() != Some(&last) || !contiguous {
        return Err(mismatch(format!("phase covers weeks {:?}", phase.weeks)));
    }

    Ok(())
}

fn validate_tasks(plan: &Plan) -> Result<(), PlanValidationError> {
    for (_, day) in plan.days() {
        for (task_index, task) in day.tasks.iter().enumerate() {
            for link in &task.resource_links {
                check_link(link).map_err(|reason| PlanValidationError::InvalidResourceLink {
                    global_day: day.global_day,
                    task_index,
                    link: link.clone(),
                    reason,
                })?;
            }
        }
    }

    for (_, day) in plan.days() {
        for (task_index, task) in day.tasks.iter().enumerate() {
            let paths = [("notebook", &task.notebook), ("artifact", &task.artifact)];
            for (field, path) in paths {
                if let Some(path) = path {
                    if !is_safe_relative_path(path) {
                        return Err(PlanValidationError::InvalidRelativePath {
                            global_day: day.global_day,
                            task_index,
                            field,
                            path: path.clone(),
                        });
                    }
                }
            }
        }
    }

    for (_, day) in plan.days() {
        for (task_index, task) in day.tasks.iter().enumerate() {
            if task.label.trim().is_empty() {
                return Err(PlanValidationError::EmptyTaskLabel {
                    global_day: day.global_day,
                    task_index,
                });
            }
        }
    }

    Ok(())
}

/// Check that `link` is an absolute http(s) URL with a host.
pub(crate) fn check_link(link: &str) -> Result<(), String> {
    let url = Url::parse(link).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}

/// True for a non-empty relative path that stays below its base directory.
pub(crate) fn is_safe_relative_path(path: &str) -> bool {
    let p = Path::new(path);
    !path.trim().is_empty()
        && !path.starts_with('/')
        && !path.starts_with('\\')
        && !p.is_absolute()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
