//! Serializing a plan for other consumers.
//!
//! JSON output uses the camelCase shape a presentation layer expects
//! (`globalDay`, `estMinutes`, ...), with absent optional fields omitted.
//! TOML output re-emits the on-disk plan directory layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Day, Phase, Plan, Priority, Task};
use crate::plan::{MANIFEST_FILE, ManifestMeta, ManifestToml};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize TOML: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// JSON views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PlanView<'a> {
    pub phases: Vec<PhaseView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PhaseView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub duration: &'a str,
    pub weeks: &'a [u32],
    pub days: Vec<DayView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView<'a> {
    pub global_day: u32,
    pub week: u32,
    pub title: &'a str,
    pub priority: Priority,
    pub tasks: Vec<TaskView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection_prompt: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView<'a> {
    pub label: &'a str,
    pub est_minutes: u32,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub resource_links: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebook: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a str>,
}

impl<'a> From<&'a Plan> for PlanView<'a> {
    fn from(plan: &'a Plan) -> Self {
        Self {
            phases: plan.phases.iter().map(PhaseView::from).collect(),
        }
    }
}

impl<'a> From<&'a Phase> for PhaseView<'a> {
    fn from(phase: &'a Phase) -> Self {
        Self {
            id: &phase.id,
            title: &phase.title,
            description: &phase.description,
            duration: &phase.duration,
            weeks: &phase.weeks,
            days: phase.days.iter().map(DayView::from).collect(),
        }
    }
}

impl<'a> From<&'a Day> for DayView<'a> {
    fn from(day: &'a Day) -> Self {
        Self {
            global_day: day.global_day,
            week: day.week,
            title: &day.title,
            priority: day.priority,
            tasks: day.tasks.iter().map(TaskView::from).collect(),
            reflection_prompt: day.reflection_prompt.as_deref(),
        }
    }
}

impl<'a> From<&'a Task> for TaskView<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            label: &task.label,
            est_minutes: task.est_minutes,
            resource_links: &task.resource_links,
            notebook: task.notebook.as_deref(),
            artifact: task.artifact.as_deref(),
            success_criteria: task.success_criteria.as_deref(),
            details: task.details.as_deref(),
        }
    }
}

/// Pretty-printed camelCase JSON of the whole plan.
pub fn to_json(plan: &Plan) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&PlanView::from(plan))?)
}

// ---------------------------------------------------------------------------
// TOML plan directory
// ---------------------------------------------------------------------------

/// One file of an exported plan directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFile {
    /// Path relative to the plan directory.
    pub path: String,
    pub contents: String,
}

/// Relative path of the `index`-th (0-based) phase file.
pub fn phase_file_name(index: usize, phase: &Phase) -> String {
    format!("phases/{:02}-{}.toml", index + 1, phase.id)
}

/// Render the plan as a manifest plus one file per phase.
///
/// The manifest comes first and carries a header recording `generated_at`.
pub fn to_toml_files(plan: &Plan, generated_at: DateTime<Utc>) -> Result<Vec<PlanFile>, ExportError> {
    let names: Vec<String> = plan
        .phases
        .iter()
        .enumerate()
        .map(|(i, phase)| phase_file_name(i, phase))
        .collect();

    let manifest = ManifestToml {
        plan: ManifestMeta {
            title: plan.title.clone(),
            total_days: plan.total_days,
            phases: names.clone(),
        },
    };
    let header = format!(
        "# Exported by studyplan at {}\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let mut files = Vec::with_capacity(plan.phases.len() + 1);
    files.push(PlanFile {
        path: MANIFEST_FILE.to_string(),
        contents: header + &toml::to_string_pretty(&manifest)?,
    });
    for (name, phase) in names.into_iter().zip(&plan.phases) {
        files.push(PlanFile {
            path: name,
            contents: toml::to_string_pretty(phase)?,
        });
    }
    Ok(files)
}

/// Write the plan as a plan directory under `dir`, creating it as needed.
///
/// Returns the paths written, manifest first.
pub fn write_plan_dir(
    plan: &Plan,
    dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for file in to_toml_files(plan, generated_at)? {
        let path = dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote plan file");
        written.push(path);
    }
    Ok(written)
}
