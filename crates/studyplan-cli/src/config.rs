//! Configuration file management for studyplan.
//!
//! Provides a TOML-based config file at `~/.config/studyplan/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studyplan_core::details::LintConfig;

/// Environment variable naming a plan directory to load instead of the
/// embedded catalog.
pub const PLAN_DIR_ENV: &str = "STUDYPLAN_PLAN_DIR";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub plan: PlanSection,
    #[serde(default)]
    pub lint: LintSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlanSection {
    /// Plan directory containing `plan.toml`. Unset means the embedded plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_links: Option<usize>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the studyplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/studyplan` or
/// `~/.config/studyplan`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("studyplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("studyplan")
}

/// Return the path to the studyplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

/// Serialize and write a config file, creating parent dirs as needed.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyplanConfig {
    /// `None` loads the embedded plan.
    pub plan_dir: Option<PathBuf>,
    pub lint: LintConfig,
}

impl StudyplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Plan dir: `cli_plan_dir` > `STUDYPLAN_PLAN_DIR` env > `config_file.plan.dir` > embedded
    /// - Lint thresholds: `config_file.lint` > [`LintConfig::default`]; the
    ///   `lint` command's own flags are applied on top by the caller.
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn resolve(cli_plan_dir: Option<&Path>) -> Result<Self> {
        let path = config_path();
        let file_config = if path.exists() {
            Some(load_config(&path)?)
        } else {
            None
        };
        Ok(Self::resolve_with(cli_plan_dir, file_config))
    }

    fn resolve_with(cli_plan_dir: Option<&Path>, file_config: Option<ConfigFile>) -> Self {
        let file_config = file_config.unwrap_or_default();

        let plan_dir = if let Some(dir) = cli_plan_dir {
            Some(dir.to_path_buf())
        } else if let Some(dir) = std::env::var_os(PLAN_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(PathBuf::from(dir))
        } else {
            file_config.plan.dir
        };

        let defaults = LintConfig::default();
        let lint = LintConfig {
            min_words: file_config.lint.min_words.unwrap_or(defaults.min_words),
            min_links: file_config.lint.min_links.unwrap_or(defaults.min_links),
        };

        Self { plan_dir, lint }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
