//! Plan loading and lookup resolution.
//!
//! - [`load_plan`] returns the embedded plan, or the plan directory chosen
//!   by [`StudyplanConfig`], parsed and validated.
//! - [`resolve_phase`] and [`resolve_day`] turn user input into plan
//!   references, with an error naming what does exist on a miss.

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use tracing::debug;

use studyplan_core::catalog;
use studyplan_core::models::{Day, Phase, Plan};
use studyplan_core::query::{find_day, find_phase};

use crate::config::StudyplanConfig;

/// Load the configured plan.
pub fn load_plan(config: &StudyplanConfig) -> Result<Cow<'static, Plan>> {
    match &config.plan_dir {
        Some(dir) => {
            let plan = catalog::load_plan_dir(dir)
                .with_context(|| format!("failed to load plan directory {}", dir.display()))?;
            Ok(Cow::Owned(plan))
        }
        None => {
            debug!("using embedded plan");
            Ok(Cow::Borrowed(catalog::plan()))
        }
    }
}

/// Find a phase by id.
pub fn resolve_phase<'a>(plan: &'a Plan, id: &str) -> Result<&'a Phase> {
    match find_phase(plan, id) {
        Some(phase) => Ok(phase),
        None => {
            let ids: Vec<&str> = plan.phases.iter().map(|p| p.id.as_str()).collect();
            bail!("unknown phase {id:?}; expected one of: {}", ids.join(", "))
        }
    }
}

/// Find a day by global day number, with its phase.
pub fn resolve_day(plan: &Plan, global_day: u32) -> Result<(&Phase, &Day)> {
    find_day(plan, global_day).with_context(|| {
        format!(
            "day {global_day} not found; the plan covers days 1-{}",
            plan.total_days
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> StudyplanConfig {
        StudyplanConfig {
            plan_dir: None,
            lint: Default::default(),
        }
    }

    #[test]
    fn load_plan_defaults_to_embedded() {
        let plan = load_plan(&embedded()).unwrap();
        assert!(matches!(plan, Cow::Borrowed(_)));
        assert_eq!(plan.total_days, 364);
    }

    #[test]
    fn load_plan_reads_directory() {
        let dir = studyplan_test_utils::PlanFixture::weeks(1).write_temp();
        let config = StudyplanConfig {
            plan_dir: Some(dir.path().to_path_buf()),
            lint: Default::default(),
        };
        let plan = load_plan(&config).unwrap();
        assert_eq!(plan.total_days, 7);
    }

    #[test]
    fn load_plan_reports_directory_on_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = StudyplanConfig {
            plan_dir: Some(tmp.path().to_path_buf()),
            lint: Default::default(),
        };
        let err = load_plan(&config).unwrap_err();
        assert!(err.to_string().contains("failed to load plan directory"));
    }

    #[test]
    fn resolve_phase_lists_known_ids_on_miss() {
        let err = resolve_phase(catalog::plan(), "robotics").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown phase \"robotics\""), "got: {msg}");
        assert!(msg.contains("foundations"), "got: {msg}");
    }

    #[test]
    fn resolve_day_out_of_range() {
        let err = resolve_day(catalog::plan(), 999).unwrap_err();
        assert_eq!(
            err.to_string(),
            "day 999 not found; the plan covers days 1-364"
        );
        assert_eq!(resolve_day(catalog::plan(), 42).unwrap().0.id, "foundations");
    }
}
