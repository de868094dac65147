//! Plan TOML parser.
//!
//! Parses the `plan.toml` manifest and the per-phase TOML files, then
//! assembles them into a [`Plan`] in manifest order and validates it with
//! [`validate_plan`].

use thiserror::Error;
use tracing::debug;

use super::toml_format::{MANIFEST_FILE, ManifestToml};
use super::validate::{PlanValidationError, is_safe_relative_path, validate_plan};
use crate::models::{Phase, Plan};

/// Errors that can occur during plan parsing and validation.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("TOML parse error in {source_name}: {source}")]
    Toml {
        source_name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest lists phase file {0:?}, which does not exist")]
    MissingPhaseSource(String),

    #[error("manifest phase entry {0:?} must be a relative path inside the plan directory")]
    UnsafePhasePath(String),

    #[error("invalid plan: {0}")]
    Invalid(#[from] PlanValidationError),
}

/// Parse a `plan.toml` manifest.
///
/// Every phase entry must be a relative path without `..`, so a manifest
/// can only name files below its own directory.
pub fn parse_manifest(content: &str) -> Result<ManifestToml, PlanParseError> {
    let manifest: ManifestToml = toml::from_str(content).map_err(|source| PlanParseError::Toml {
        source_name: MANIFEST_FILE.to_string(),
        source,
    })?;
    if let Some(name) = manifest
        .plan
        .phases
        .iter()
        .find(|name| !is_safe_relative_path(name))
    {
        return Err(PlanParseError::UnsafePhasePath(name.clone()));
    }
    Ok(manifest)
}

/// Parse one phase file. `source_name` is only used for error messages.
pub fn parse_phase_toml(source_name: &str, content: &str) -> Result<Phase, PlanParseError> {
    let phase: Phase = toml::from_str(content).map_err(|source| PlanParseError::Toml {
        source_name: source_name.to_string(),
        source,
    })?;
    debug!(
        source = source_name,
        phase = %phase.id,
        days = phase.days.len(),
        "parsed phase"
    );
    Ok(phase)
}

/// Build a [`Plan`] from a manifest and its phases, then validate it.
///
/// `phases` must be in manifest order.
pub fn assemble_plan(manifest: ManifestToml, phases: Vec<Phase>) -> Result<Plan, PlanParseError> {
    let plan = Plan {
        title: manifest.plan.title,
        total_days: manifest.plan.total_days,
        phases,
    };
    validate_plan(&plan)?;
    Ok(plan)
}

/// Parse a manifest and resolve each listed phase file through `lookup`.
///
/// `lookup` returns the contents of a phase file by its manifest entry, or
/// `None` if there is no such file.
pub fn parse_plan_sources<'a, F>(manifest: &str, mut lookup: F) -> Result<Plan, PlanParseError>
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let manifest = parse_manifest(manifest)?;
    let phases = manifest
        .plan
        .phases
        .iter()
        .map(|name| {
            let content =
                lookup(name).ok_or_else(|| PlanParseError::MissingPhaseSource(name.clone()))?;
            parse_phase_toml(name, content)
        })
        .collect::<Result<Vec<_>, _>>()?;
    assemble_plan(manifest, phases)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[plan]
title = "Tiny"
total_days = 7
phases = ["phases/01-week-one.toml"]
"#;

    const WEEK_ONE: &str = r#"
id = "week-one"
title = "Week One"
description = "A single week."
duration = "7 days (Week 1)"
weeks = [1]

[[days]]
global_day = 1
week = 1
title = "Day one"
priority = "HIGH"
reflection_prompt = "What did you learn?"

[[days.tasks]]
label = "Read"
est_minutes = 30
resource_links = ["https://example.com/read"]

[[days]]
global_day = 2
week = 1
title = "Day two"
priority = "MEDIUM"

[[days.tasks]]
label = "Practice"
est_minutes = 60
notebook = "week_one/day02_practice.ipynb"

[[days]]
global_day = 3
week = 1
title = "Day three"
priority = "MEDIUM"

[[days.tasks]]
label = "Practice"
est_minutes = 60

[[days]]
global_day = 4
week = 1
title = "Day four"
priority = "LOW"

[[days.tasks]]
label = "Practice"
est_minutes = 60

[[days]]
global_day = 5
week = 1
title = "Day five"
priority = "LOW"

[[days.tasks]]
label = "Practice"
est_minutes = 60

[[days]]
global_day = 6
week = 1
title = "Day six"
priority = "LOW"

[[days.tasks]]
label = "Practice"
est_minutes = 60

[[days]]
global_day = 7
week = 1
title = "Day seven"
priority = "HIGH"

[[days.tasks]]
label = "Review"
est_minutes = 90
"#;

    fn lookup(name: &str) -> Option<&'static str> {
        (name == "phases/01-week-one.toml").then_some(WEEK_ONE)
    }

    #[test]
    fn parse_valid_plan() {
        let plan = parse_plan_sources(MANIFEST, lookup).expect("should parse");
        assert_eq!(plan.title, "Tiny");
        assert_eq!(plan.total_days, 7);
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].days.len(), 7);
        assert_eq!(
            plan.phases[0].days[0].tasks[0].resource_links,
            vec!["https://example.com/read"]
        );
    }

    #[test]
    fn rejects_missing_phase_source() {
        let err = parse_plan_sources(MANIFEST, |_| None).unwrap_err();
        assert!(
            matches!(err, PlanParseError::MissingPhaseSource(ref n) if n == "phases/01-week-one.toml"),
            "expected MissingPhaseSource, got: {err}"
        );
    }

    #[test]
    fn rejects_manifest_entries_outside_the_plan_dir() {
        for entry in ["../outside.toml", "/etc/passwd", "phases/../../x.toml", ""] {
            let manifest = MANIFEST.replace("phases/01-week-one.toml", entry);
            let mut asked = false;
            let err = parse_plan_sources(&manifest, |_| {
                asked = true;
                Some(WEEK_ONE)
            })
            .unwrap_err();
            assert!(
                matches!(err, PlanParseError::UnsafePhasePath(ref n) if n == entry),
                "expected UnsafePhasePath for {entry:?}, got: {err}"
            );
            assert!(!asked, "{entry:?} was looked up");
        }
    }

    #[test]
    fn toml_error_names_the_source() {
        let err = parse_phase_toml("phases/broken.toml", "id = ").unwrap_err();
        assert!(
            matches!(err, PlanParseError::Toml { ref source_name, .. } if source_name == "phases/broken.toml"),
            "expected Toml error, got: {err}"
        );
        assert!(err.to_string().contains("phases/broken.toml"));
    }

    #[test]
    fn rejects_negative_minutes() {
        let content = WEEK_ONE.replacen("est_minutes = 30", "est_minutes = -30", 1);
        let err = parse_phase_toml("phases/01-week-one.toml", &content).unwrap_err();
        assert!(
            matches!(err, PlanParseError::Toml { .. }),
            "expected Toml error, got: {err}"
        );
    }

    #[test]
    fn rejects_unknown_priority() {
        let content = WEEK_ONE.replacen(r#"priority = "HIGH""#, r#"priority = "URGENT""#, 1);
        let err = parse_phase_toml("phases/01-week-one.toml", &content).unwrap_err();
        assert!(matches!(err, PlanParseError::Toml { .. }));
    }

    #[test]
    fn manifest_error_names_plan_toml() {
        let err = parse_manifest("[plan]\ntitle = 3").unwrap_err();
        assert!(err.to_string().contains("plan.toml"));
    }

    #[test]
    fn validation_errors_surface_as_invalid() {
        let manifest = MANIFEST.replace("total_days = 7", "total_days = 8");
        let err = parse_plan_sources(&manifest, lookup).unwrap_err();
        assert!(
            matches!(
                err,
                PlanParseError::Invalid(PlanValidationError::MissingDays {
                    last: 7,
                    total_days: 8
                })
            ),
            "expected MissingDays, got: {err}"
        );
    }

    #[test]
    fn phases_follow_manifest_order() {
        let manifest = r#"
[plan]
title = "Order"
total_days = 7
phases = ["b.toml"]
"#;
        let mut asked = Vec::new();
        let _ = parse_plan_sources(manifest, |name| {
            asked.push(name.to_string());
            Some(WEEK_ONE)
        });
        assert_eq!(asked, vec!["b.toml"]);
    }
}
