mod config;
mod export_cmd;
mod lint_cmd;
mod resolve;
mod search_cmd;
mod show_cmds;
mod stats_cmd;
#[cfg(test)]
mod test_util;
mod validate_cmd;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use studyplan_core::models::Plan;

use config::StudyplanConfig;
use export_cmd::ExportFormat;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Browse and validate the 364-day AI/ML study plan")]
struct Cli {
    /// Plan directory to load instead of the built-in plan
    /// (overrides STUDYPLAN_PLAN_DIR env var)
    #[arg(long, global = true)]
    plan: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a studyplan config file
    Init {
        /// Plan directory to record in the config file
        #[arg(long)]
        plan_dir: Option<PathBuf>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Load and validate the plan
    Validate {
        /// Also run the advisory task-details lint
        #[arg(long)]
        details: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
    #[command(flatten)]
    View(ViewCommands),
}

/// Commands that read a loaded plan.
#[derive(Subcommand)]
pub enum ViewCommands {
    /// List all phases
    Phases,
    /// Show one phase and its days
    Phase {
        /// Phase id (e.g. foundations)
        id: String,
    },
    /// Show one day and its tasks
    Day {
        /// Global day number (1-364)
        day: u32,
        /// Print the day as camelCase JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the days of a calendar week
    Week {
        /// Week number (1-52)
        week: u32,
    },
    /// Search task labels (case-insensitive)
    Search {
        /// Text to look for
        query: String,
        /// Restrict the search to one phase
        #[arg(long)]
        phase: Option<String>,
    },
    /// Show estimated time and priority breakdown
    Stats {
        /// Restrict to one phase
        #[arg(long)]
        phase: Option<String>,
    },
    /// Lint task detail write-ups (exits non-zero when issues exist)
    Lint {
        /// Restrict to one phase
        #[arg(long)]
        phase: Option<String>,
        /// Minimum words per fragment (overrides config file)
        #[arg(long)]
        min_words: Option<usize>,
        /// Minimum source links per fragment (overrides config file)
        #[arg(long)]
        min_links: Option<usize>,
    },
    /// Export the plan
    Export {
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file (JSON) or directory (TOML); defaults to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Execute the `studyplan init` command: write config file.
fn cmd_init(plan_dir: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        plan: config::PlanSection { dir: plan_dir },
        lint: config::LintSection::default(),
    };
    config::save_config(&path, &cfg)?;

    println!("Config written to {}", path.display());
    match &cfg.plan.dir {
        Some(dir) => println!("  plan.dir = {}", dir.display()),
        None => println!("  plan.dir unset (built-in plan)"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { plan_dir, force } => cmd_init(plan_dir, force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyplan", &mut std::io::stdout());
            Ok(())
        }
        Commands::Validate { details } => {
            let config = StudyplanConfig::resolve(cli.plan.as_deref())?;
            validate_cmd::run_validate(&config, details)
        }
        Commands::View(command) => {
            let config = StudyplanConfig::resolve(cli.plan.as_deref())?;
            let plan = resolve::load_plan(&config)?;
            run_view(command, &plan, &config)
        }
    }
}

/// Dispatch a `ViewCommands` variant against a loaded plan.
fn run_view(command: ViewCommands, plan: &Plan, config: &StudyplanConfig) -> anyhow::Result<()> {
    match command {
        ViewCommands::Phases => show_cmds::run_phases(plan),
        ViewCommands::Phase { id } => show_cmds::run_phase(resolve::resolve_phase(plan, &id)?),
        ViewCommands::Day { day, json } => {
            let (phase, day) = resolve::resolve_day(plan, day)?;
            show_cmds::run_day(phase, day, json)
        }
        ViewCommands::Week { week } => show_cmds::run_week(plan, week),
        ViewCommands::Search { query, phase } => {
            search_cmd::run_search(plan, &query, phase.as_deref())
        }
        ViewCommands::Stats { phase } => stats_cmd::run_stats(plan, phase.as_deref()),
        ViewCommands::Lint {
            phase,
            min_words,
            min_links,
        } => {
            let mut lint = config.lint;
            if let Some(n) = min_words {
                lint.min_words = n;
            }
            if let Some(n) = min_links {
                lint.min_links = n;
            }
            lint_cmd::run_lint(plan, phase.as_deref(), &lint)
        }
        ViewCommands::Export { format, output } => {
            export_cmd::run_export(plan, format, output.as_deref())
        }
    }
}
