//! Advisory lint for task `details` HTML fragments.
//!
//! Each fragment should read as a small brief: enough prose, the four
//! labelled sections, and at least a couple of source links that open in a
//! new tab without leaking the opener. Issues are reported, never fatal.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::models::{Phase, Plan};
use crate::plan::validate::check_link;

/// Section labels every fragment must contain as `<strong>{label}:</strong>`.
pub const REQUIRED_SECTIONS: [&str; 4] = ["Action", "Boundaries", "Deliverable", "Verification"];

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// `<a href="...">text</a>`; group 2 holds the attributes after `href`.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href="([^"]+)"([^>]*)>([^<]+)</a>"#).expect("valid anchor regex")
});

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Thresholds for the lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintConfig {
    pub min_words: usize,
    pub min_links: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_words: 120,
            min_links: 2,
        }
    }
}

/// What is wrong with one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailIssueKind {
    TooFewWords { words: usize, min: usize },
    MissingSection { section: &'static str },
    TooFewLinks { links: usize, min: usize },
    MissingTarget { href: String },
    MissingRel { href: String },
    InvalidHref { href: String, reason: String },
}

impl fmt::Display for DetailIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewWords { words, min } => {
                write!(f, "only {words} words (minimum {min} required)")
            }
            Self::MissingSection { section } => {
                write!(f, "missing <strong>{section}:</strong> section")
            }
            Self::TooFewLinks { links, min } => {
                write!(f, "only {links} source links (minimum {min} required)")
            }
            Self::MissingTarget { href } => write!(f, "link to {href} missing target=\"_blank\""),
            Self::MissingRel { href } => {
                write!(f, "link to {href} missing rel=\"noopener\" or rel=\"noreferrer\"")
            }
            Self::InvalidHref { href, reason } => write!(f, "link {href:?} is invalid: {reason}"),
        }
    }
}

/// Result of checking one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCheck {
    pub words: usize,
    pub links: usize,
    pub issues: Vec<DetailIssueKind>,
}

/// An issue located in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailIssue {
    pub phase_id: String,
    pub global_day: u32,
    pub task_index: usize,
    pub label: String,
    #[serde(flatten)]
    pub kind: DetailIssueKind,
}

/// Per-phase lint totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSummary {
    pub phase_id: String,
    pub total_tasks: usize,
    pub tasks_with_details: usize,
    pub min_words: Option<usize>,
    pub max_words: Option<usize>,
    pub total_words: usize,
    pub issues: usize,
}

impl DetailSummary {
    pub fn avg_words(&self) -> Option<f64> {
        (self.tasks_with_details > 0)
            .then(|| self.total_words as f64 / self.tasks_with_details as f64)
    }
}

/// Lint output for a set of phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintReport {
    pub summaries: Vec<DetailSummary>,
    pub issues: Vec<DetailIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Strip tags and decode the common entities.
pub fn plain_text(html: &str) -> String {
    let mut text = TAG_RE.replace_all(html, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text
}

/// Whitespace-separated words in the plain text of `html`.
pub fn word_count(html: &str) -> usize {
    plain_text(html).split_whitespace().count()
}

/// Check a single fragment.
pub fn check_details(html: &str, config: &LintConfig) -> DetailCheck {
    let mut issues = Vec::new();

    let words = word_count(html);
    if words < config.min_words {
        issues.push(DetailIssueKind::TooFewWords {
            words,
            min: config.min_words,
        });
    }

    for section in REQUIRED_SECTIONS {
        if !html.contains(&format!("<strong>{section}:</strong>")) {
            issues.push(DetailIssueKind::MissingSection { section });
        }
    }

    let anchors: Vec<_> = ANCHOR_RE.captures_iter(html).collect();
    if anchors.len() < config.min_links {
        issues.push(DetailIssueKind::TooFewLinks {
            links: anchors.len(),
            min: config.min_links,
        });
    }

    for caps in &anchors {
        let href = caps[1].to_string();
        let attrs = &caps[2];
        if !attrs.contains(r#"target="_blank""#) {
            issues.push(DetailIssueKind::MissingTarget { href: href.clone() });
        }
        if !attrs.contains(r#"rel="noopener""#) && !attrs.contains(r#"rel="noreferrer""#) {
            issues.push(DetailIssueKind::MissingRel { href: href.clone() });
        }
        if let Err(reason) = check_link(&href) {
            issues.push(DetailIssueKind::InvalidHref { href, reason });
        }
    }

    DetailCheck {
        words,
        links: anchors.len(),
        issues,
    }
}

/// Lint every task with details in one phase.
pub fn lint_phase(phase: &Phase, config: &LintConfig) -> (DetailSummary, Vec<DetailIssue>) {
    let mut summary = DetailSummary {
        phase_id: phase.id.clone(),
        total_tasks: phase.task_count(),
        tasks_with_details: 0,
        min_words: None,
        max_words: None,
        total_words: 0,
        issues: 0,
    };
    let mut issues = Vec::new();

    for day in &phase.days {
        for (task_index, task) in day.tasks.iter().enumerate() {
            let Some(html) = task.details.as_deref() else {
                continue;
            };
            let check = check_details(html, config);

            summary.tasks_with_details += 1;
            summary.total_words += check.words;
            summary.min_words = Some(summary.min_words.map_or(check.words, |m| m.min(check.words)));
            summary.max_words = Some(summary.max_words.map_or(check.words, |m| m.max(check.words)));
            summary.issues += check.issues.len();

            issues.extend(check.issues.into_iter().map(|kind| DetailIssue {
                phase_id: phase.id.clone(),
                global_day: day.global_day,
                task_index,
                label: task.label.clone(),
                kind,
            }));
        }
    }

    debug!(
        phase = %phase.id,
        tasks_with_details = summary.tasks_with_details,
        issues = summary.issues,
        "linted phase details"
    );
    (summary, issues)
}

/// Lint the given phases.
pub fn lint_phases<'a, I>(phases: I, config: &LintConfig) -> LintReport
where
    I: IntoIterator<Item = &'a Phase>,
{
    let mut report = LintReport::default();
    for phase in phases {
        let (summary, issues) = lint_phase(phase, config);
        report.summaries.push(summary);
        report.issues.extend(issues);
    }
    report
}

/// Lint every phase of `plan`.
pub fn lint_plan(plan: &Plan, config: &LintConfig) -> LintReport {
    lint_phases(&plan.phases, config)
}
