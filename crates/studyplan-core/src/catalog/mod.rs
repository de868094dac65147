//! The embedded curriculum and on-disk plan directories.
//!
//! The shipped 364-day plan is stored as TOML next to this module
//! (`plan.toml` plus `phases/*.toml`) and embedded in the binary at compile
//! time. [`plan`] parses and validates it once on first access.
//! [`load_plan_dir`] loads a directory with the same layout at run time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use thiserror::Error;
use tracing::info;

use crate::models::{Phase, Plan};
use crate::plan::{
    MANIFEST_FILE, PlanParseError, assemble_plan, parse_manifest, parse_phase_toml,
    parse_plan_sources,
};

/// The embedded manifest.
static MANIFEST_TOML: &str = include_str!("plan.toml");

/// The embedded phase files, keyed by their manifest entry.
static PHASE_SOURCES: [(&str, &str); 14] = [
    ("phases/01-foundations.toml", include_str!("phases/01-foundations.toml")),
    ("phases/02-buffer-setup.toml", include_str!("phases/02-buffer-setup.toml")),
    ("phases/03-classical-ml.toml", include_str!("phases/03-classical-ml.toml")),
    ("phases/04-deep-learning.toml", include_str!("phases/04-deep-learning.toml")),
    ("phases/05-nlp-warmup.toml", include_str!("phases/05-nlp-warmup.toml")),
    ("phases/06-transformers.toml", include_str!("phases/06-transformers.toml")),
    ("phases/07-gpt-from-scratch.toml", include_str!("phases/07-gpt-from-scratch.toml")),
    ("phases/08-tokenizer-scaling.toml", include_str!("phases/08-tokenizer-scaling.toml")),
    ("phases/09-serving-safety.toml", include_str!("phases/09-serving-safety.toml")),
    ("phases/10-peft-optimization.toml", include_str!("phases/10-peft-optimization.toml")),
    ("phases/11-buffer-refactor.toml", include_str!("phases/11-buffer-refactor.toml")),
    ("phases/12-mlops.toml", include_str!("phases/12-mlops.toml")),
    ("phases/13-capstone.toml", include_str!("phases/13-capstone.toml")),
    ("phases/14-portfolio.toml", include_str!("phases/14-portfolio.toml")),
];

static PLAN: LazyLock<Plan> = LazyLock::new(|| {
    parse_plan_sources(MANIFEST_TOML, embedded_phase).expect("embedded study plan is invalid")
});

/// Errors from loading a plan directory.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] PlanParseError),
}

/// The shipped curriculum.
///
/// # Panics
///
/// Panics on first access if the embedded TOML is malformed or fails
/// validation. The catalog tests load it on every run.
pub fn plan() -> &'static Plan {
    &PLAN
}

/// Raw embedded sources: the manifest first, then every phase file, as
/// `(relative path, contents)` pairs.
pub fn embedded_sources() -> Vec<(&'static str, &'static str)> {
    std::iter::once((MANIFEST_FILE, MANIFEST_TOML))
        .chain(PHASE_SOURCES.iter().copied())
        .collect()
}

fn embedded_phase(name: &str) -> Option<&'static str> {
    PHASE_SOURCES
        .iter()
        .find(|(path, _)| *path == name)
        .map(|(_, content)| *content)
}

/// Load and validate a plan directory containing `plan.toml` and the phase
/// files it lists.
pub fn load_plan_dir(dir: &Path) -> Result<Plan, CatalogError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = parse_manifest(&read(&manifest_path)?)?;

    let mut phases: Vec<Phase> = Vec::with_capacity(manifest.plan.phases.len());
    for name in &manifest.plan.phases {
        let path = dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PlanParseError::MissingPhaseSource(name.clone()).into());
            }
            Err(source) => return Err(CatalogError::Io { path, source }),
        };
        phases.push(parse_phase_toml(name, &content)?);
    }

    let plan = assemble_plan(manifest, phases)?;
    info!(
        dir = %dir.display(),
        phases = plan.phases.len(),
        days = plan.total_days,
        "loaded plan from disk"
    );
    Ok(plan)
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
