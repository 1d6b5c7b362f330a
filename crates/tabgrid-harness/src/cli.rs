use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tabgrid_layout::EngineConfig;

use crate::error::{HarnessError, Result};
use crate::replay::{load_config, replay_file};
use crate::report::{layout_catalogue, render_catalogue, validate_templates};

#[derive(Debug, Parser)]
#[command(
    name = "tabgrid-harness",
    about = "List, validate and replay tabgrid pane layouts",
    version
)]
pub struct Cli {
    /// Log engine decisions at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every layout with its host code and frame count.
    Layouts(LayoutsArgs),

    /// Check every template's structural invariants.
    Validate(ValidateArgs),

    /// Apply a JSON command script to a fresh container.
    Replay(ReplayArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LayoutsArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Engine config (TOML, or JSON by extension) supplying the minimums.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON array of host commands.
    #[arg(long)]
    pub script: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::init_tracing(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let output = render(cli.command)?;
    print!("{output}");
    Ok(())
}

/// Run a command and return what it would print.
pub fn render(command: Commands) -> Result<String> {
    match command {
        Commands::Layouts(args) => {
            let rows = layout_catalogue();
            if args.json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?))
            } else {
                Ok(render_catalogue(&rows))
            }
        }
        Commands::Validate(args) => {
            let config = match args.config.as_deref() {
                Some(path) => load_config(path)?,
                None => EngineConfig::default(),
            };
            let report = validate_templates(&config);
            if !report.is_clean() {
                eprint!("{}", report.render());
                return Err(HarnessError::InvalidTemplates {
                    count: report.issue_count(),
                });
            }
            if args.json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
            } else {
                Ok(report.render())
            }
        }
        Commands::Replay(args) => {
            let report = replay_file(&args.script, args.config.as_deref())?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
        }
    }
}
