//! Properties of the shipped curriculum.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use studyplan_core::catalog::{load_plan_dir, plan};
use studyplan_core::details::{DetailIssueKind, LintConfig, lint_plan};
use studyplan_core::export::{to_json, write_plan_dir};
use studyplan_core::models::Priority;
use studyplan_core::plan::format_duration;
use studyplan_core::query::{find_day, find_phase, search_tasks};
use studyplan_core::stats::PlanStats;

const PHASE_IDS: [&str; 14] = [
    "foundations",
    "buffer-setup",
    "classical-ml",
    "deep-learning",
    "nlp-warmup",
    "transformers",
    "gpt-from-scratch",
    "tokenizer-scaling",
    "serving-safety",
    "peft-optimization",
    "buffer-refactor",
    "mlops",
    "capstone",
    "portfolio",
];

#[test]
fn fourteen_phases_in_order() {
    let ids: Vec<&str> = plan().phases.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, PHASE_IDS);
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 14);
}

#[test]
fn days_cover_the_year_contiguously() {
    let days: Vec<u32> = plan().days().map(|(_, d)| d.global_day).collect();
    let expected: Vec<u32> = (1..=364).collect();
    assert_eq!(days, expected);
    assert_eq!(plan().total_days, 364);
}

#[test]
fn phase_boundaries() {
    let ranges: Vec<(u32, u32)> = plan()
        .phases
        .iter()
        .map(|p| p.day_range().unwrap())
        .collect();
    assert_eq!(ranges.first(), Some(&(1, 42)));
    assert_eq!(ranges.last(), Some(&(337, 364)));
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].1 + 1, pair[1].0);
    }
}

#[test]
fn weeks_are_listed_by_their_phase() {
    let mut previous = 0;
    for (phase, day) in plan().days() {
        assert!(phase.weeks.contains(&day.week), "day {}", day.global_day);
        assert!(day.week >= previous, "day {}", day.global_day);
        previous = day.week;
    }
    assert_eq!(find_day(plan(), 364).unwrap().1.week, 52);
}

#[test]
fn day_357_keeps_its_authored_week() {
    // The authored calendar starts the final week one day early.
    assert_eq!(find_day(plan(), 356).unwrap().1.week, 51);
    assert_eq!(find_day(plan(), 357).unwrap().1.week, 52);
}

#[test]
fn durations_are_canonical() {
    for phase in &plan().phases {
        assert_eq!(
            phase.duration,
            format_duration(phase.days.len(), &phase.weeks),
            "phase {}",
            phase.id
        );
    }
}

#[test]
fn every_day_has_tasks_and_a_title() {
    for (_, day) in plan().days() {
        assert!(!day.title.trim().is_empty());
        assert!(!day.tasks.is_empty(), "day {} has no tasks", day.global_day);
    }
    assert_eq!(plan().task_count(), 1540);
}

#[test]
fn resource_links_are_absolute_http() {
    for (_, day) in plan().days() {
        for task in &day.tasks {
            for link in &task.resource_links {
                assert!(
                    link.starts_with("https://") || link.starts_with("http://"),
                    "day {}: {link}",
                    day.global_day
                );
            }
        }
    }
}

#[test]
fn first_and_last_days() {
    let (phase, day) = find_day(plan(), 1).unwrap();
    assert_eq!(phase.id, "foundations");
    assert_eq!(day.title, "Environment Setup & Vectors Introduction");
    assert_eq!(day.priority, Priority::High);
    assert_eq!(day.tasks.len(), 6);

    let (phase, day) = find_day(plan(), 364).unwrap();
    assert_eq!(phase.id, "portfolio");
    assert_eq!(day.title, "Rest & Recharge");
    assert_eq!(day.priority, Priority::Low);

    assert!(find_day(plan(), 0).is_none());
    assert!(find_day(plan(), 365).is_none());
}

#[test]
fn stats_totals() {
    let stats = PlanStats::from_plan(plan());
    assert_eq!(stats.days, 364);
    assert_eq!(stats.tasks, 1540);
    assert_eq!(stats.est_minutes, 79_287);
    assert_eq!(stats.priorities.high, 199);
    assert_eq!(stats.priorities.medium, 156);
    assert_eq!(stats.priorities.low, 9);
    assert_eq!(stats.tasks_with_details, 36);
}

#[test]
fn search_finds_day_one_video() {
    let hits = search_tasks(plan(), "3blue1brown", None);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].key, "llmPlan_foundations_day1_task1");

    let scoped = search_tasks(plan(), "3blue1brown", Some("portfolio"));
    assert!(scoped.iter().all(|m| m.phase_id == "portfolio"));
}

#[test]
fn lint_reports_known_issues_in_foundations() {
    let report = lint_plan(plan(), &LintConfig::default());

    let detailed: usize = report.summaries.iter().map(|s| s.tasks_with_details).sum();
    assert_eq!(detailed, 36);
    let foundations = &report.summaries[0];
    assert_eq!(foundations.phase_id, "foundations");
    assert_eq!(foundations.tasks_with_details, 36);
    assert_eq!(foundations.min_words, Some(97));
    assert_eq!(foundations.max_words, Some(167));
    assert_eq!(report.issues.len(), 27);
    assert!(report.issues.iter().all(|i| i.phase_id == "foundations"));
    assert!(report.issues.iter().all(|i| i.global_day <= 7));

    let day_one = |task_index: usize| -> Vec<&DetailIssueKind> {
        report
            .issues
            .iter()
            .filter(|i| i.global_day == 1 && i.task_index == task_index)
            .map(|i| &i.kind)
            .collect()
    };
    assert_eq!(
        day_one(0),
        vec![&DetailIssueKind::TooFewWords { words: 98, min: 120 }]
    );
    assert!(day_one(2).is_empty());
    assert!(day_one(5).is_empty());
    assert!(
        day_one(3).contains(&&DetailIssueKind::TooFewLinks { links: 1, min: 2 }),
        "got {:?}",
        day_one(3)
    );

    assert!(!report.issues.iter().any(|i| matches!(
        i.kind,
        DetailIssueKind::MissingTarget { .. } | DetailIssueKind::MissingRel { .. }
    )));
}

#[test]
fn json_export_covers_every_day() {
    let json: serde_json::Value = serde_json::from_str(&to_json(plan()).unwrap()).unwrap();
    let phases = json["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 14);
    let days: usize = phases.iter().map(|p| p["days"].as_array().unwrap().len()).sum();
    assert_eq!(days, 364);
    assert_eq!(phases[13]["days"][27]["globalDay"], 364);
}

#[test]
fn toml_export_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let written = write_plan_dir(plan(), dir.path(), at).unwrap();
    assert_eq!(written.len(), 15);
    assert!(written[0].ends_with("plan.toml"));

    let reloaded = load_plan_dir(dir.path()).unwrap();
    assert_eq!(&reloaded, plan());
}

#[test]
fn find_phase_by_id() {
    let phase = find_phase(plan(), "capstone").unwrap();
    assert_eq!(phase.day_range(), Some((309, 336)));
    assert!(find_phase(plan(), "Capstone").is_none());
}
