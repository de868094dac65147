//! Shared test utilities for studyplan integration tests.
//!
//! [`PlanFixture`] describes a small, valid plan (phases of consecutive
//! days, one calendar week per seven days) and renders it into the on-disk
//! plan directory layout: `plan.toml` plus `phases/NN-<id>.toml`.
//! [`PlanDir`] holds a rendered fixture in a temporary directory and offers
//! helpers to break it in targeted ways.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Days per fixture week.
const DAYS_PER_WEEK: u32 = 7;

const PRIORITIES: [&str; 3] = ["HIGH", "MEDIUM", "LOW"];

#[derive(Debug, Clone)]
struct PhaseSpec {
    id: String,
    days: u32,
}

/// Builder for a valid plan directory.
#[derive(Debug, Clone)]
pub struct PlanFixture {
    title: String,
    phases: Vec<PhaseSpec>,
    tasks_per_day: usize,
}

impl Default for PlanFixture {
    fn default() -> Self {
        Self::new("Fixture Plan")
    }
}

impl PlanFixture {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            phases: Vec::new(),
            tasks_per_day: 2,
        }
    }

    /// A plan of `weeks` one-week phases named `week-1`, `week-2`, ...
    pub fn weeks(weeks: u32) -> Self {
        (1..=weeks).fold(Self::default(), |fixture, w| {
            fixture.phase(&format!("week-{w}"), DAYS_PER_WEEK)
        })
    }

    /// Append a phase of `days` days.
    pub fn phase(mut self, id: &str, days: u32) -> Self {
        self.phases.push(PhaseSpec {
            id: id.to_string(),
            days,
        });
        self
    }

    pub fn tasks_per_day(mut self, n: usize) -> Self {
        self.tasks_per_day = n;
        self
    }

    pub fn total_days(&self) -> u32 {
        self.phases.iter().map(|p| p.days).sum()
    }

    /// Relative path of the `index`-th (0-based) phase file.
    pub fn phase_path(&self, index: usize) -> String {
        format!("phases/{:02}-{}.toml", index + 1, self.phases[index].id)
    }

    pub fn manifest(&self) -> String {
        let paths: Vec<String> = (0..self.phases.len())
            .map(|i| format!("{:?}", self.phase_path(i)))
            .collect();
        format!(
            "[plan]\ntitle = {:?}\ntotal_days = {}\nphases = [{}]\n",
            self.title,
            self.total_days(),
            paths.join(", ")
        )
    }

    /// Every file of the plan directory as `(relative path, contents)`,
    /// manifest first.
    pub fn files(&self) -> Vec<(String, String)> {
        let mut files = vec![("plan.toml".to_string(), self.manifest())];
        let mut first_day = 1;
        for (i, spec) in self.phases.iter().enumerate() {
            files.push((self.phase_path(i), self.render_phase(spec, first_day)));
            first_day += spec.days;
        }
        files
    }

    /// Render into `dir`, creating directories as needed.
    pub fn write_to(&self, dir: &Path) {
        for (rel, contents) in self.files() {
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create fixture directory");
            }
            fs::write(&path, contents).expect("failed to write fixture file");
        }
    }

    /// Render into a fresh temporary directory.
    pub fn write_temp(&self) -> PlanDir {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        self.write_to(dir.path());
        PlanDir { dir }
    }

    fn render_phase(&self, spec: &PhaseSpec, first_day: u32) -> String {
        let days: Vec<u32> = (first_day..first_day + spec.days).collect();
        let mut weeks: Vec<u32> = days.iter().map(|&n| week_of(n)).collect();
        weeks.dedup();

        let unit = if spec.days == 1 { "day" } else { "days" };
        let duration = match (weeks.first(), weeks.last()) {
            (Some(a), Some(b)) if a == b => format!("{} {unit} (Week {a})", spec.days),
            (Some(a), Some(b)) => format!("{} {unit} (Weeks {a}-{b})", spec.days),
            _ => format!("{} {unit}", spec.days),
        };
        let week_list: Vec<String> = weeks.iter().map(u32::to_string).collect();

        let mut out = String::new();
        writeln!(out, "id = {:?}", spec.id).unwrap();
        writeln!(out, "title = {:?}", format!("Phase {}", spec.id)).unwrap();
        writeln!(out, "description = {:?}", format!("Fixture phase {}.", spec.id)).unwrap();
        writeln!(out, "duration = {duration:?}").unwrap();
        writeln!(out, "weeks = [{}]", week_list.join(", ")).unwrap();

        for n in days {
            writeln!(out, "\n[[days]]").unwrap();
            writeln!(out, "global_day = {n}").unwrap();
            writeln!(out, "week = {}", week_of(n)).unwrap();
            writeln!(out, "title = \"Day {n} topic\"").unwrap();
            writeln!(out, "priority = {:?}", PRIORITIES[(n as usize - 1) % 3]).unwrap();
            for t in 0..self.tasks_per_day {
                writeln!(out, "\n[[days.tasks]]").unwrap();
                writeln!(out, "label = \"Study topic {n}.{t}\"").unwrap();
                writeln!(out, "est_minutes = 60").unwrap();
                writeln!(
                    out,
                    "resource_links = [\"https://example.com/day{n}/task{t}\"]"
                )
                .unwrap();
                writeln!(out, "notebook = \"{}/day{n:02}_task{t}.ipynb\"", spec.id).unwrap();
            }
        }
        out
    }
}

fn week_of(global_day: u32) -> u32 {
    (global_day - 1) / DAYS_PER_WEEK + 1
}

/// A rendered plan directory, removed on drop.
#[derive(Debug)]
pub struct PlanDir {
    dir: TempDir,
}

impl PlanDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.file(rel)).expect("failed to read fixture file")
    }

    pub fn write(&self, rel: &str, contents: &str) {
        fs::write(self.file(rel), contents).expect("failed to write fixture file");
    }

    /// Replace the first occurrence of `from` with `to` in `rel`.
    ///
    /// Panics if `from` does not occur, so a typo in a test cannot
    /// silently leave the fixture valid.
    pub fn replace(&self, rel: &str, from: &str, to: &str) {
        let contents = self.read(rel);
        assert!(contents.contains(from), "{from:?} not found in {rel}");
        self.write(rel, &contents.replacen(from, to, 1));
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.file(rel)).expect("failed to remove fixture file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_builds_one_phase_per_week() {
        let fixture = PlanFixture::weeks(2);
        assert_eq!(fixture.total_days(), 14);
        let files = fixture.files();
        assert_eq!(files.len(), 3);
        assert_eq!(files[1].0, "phases/01-week-1.toml");
        assert!(files[2].1.contains("duration = \"7 days (Week 2)\""));
        assert!(files[2].1.contains("global_day = 8"));
    }

    #[test]
    fn phase_spanning_weeks_lists_them() {
        let fixture = PlanFixture::default().phase("long", 10);
        let phase = &fixture.files()[1].1;
        assert!(phase.contains("weeks = [1, 2]"));
        assert!(phase.contains("duration = \"10 days (Weeks 1-2)\""));
    }

    #[test]
    fn rendered_phase_has_every_day_and_task() {
        let fixture = PlanFixture::weeks(1).tasks_per_day(2);
        let phase = &fixture.files()[1].1;
        assert_eq!(phase.matches("[[days]]").count(), 7);
        assert_eq!(phase.matches("[[days.tasks]]").count(), 14);
        assert!(phase.contains("notebook = \"week-1/day07_task1.ipynb\""));
    }

    #[test]
    fn manifest_lists_phase_paths() {
        let fixture = PlanFixture::default().phase("a", 3).phase("b", 4);
        let manifest = fixture.manifest();
        assert!(manifest.contains("total_days = 7"));
        assert!(manifest.contains(r#"phases = ["phases/01-a.toml", "phases/02-b.toml"]"#));
    }

    #[test]
    fn plan_dir_edits_files() {
        let dir = PlanFixture::weeks(1).write_temp();
        dir.replace("plan.toml", "total_days = 7", "total_days = 8");
        assert!(dir.read("plan.toml").contains("total_days = 8"));
        dir.remove("phases/01-week-1.toml");
        assert!(!dir.file("phases/01-week-1.toml").exists());
    }
}
