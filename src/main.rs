use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use harden_config::ConfigFile;
use harden_report::{HtmlRenderer, NoopSummary, ReportEmitter, SummaryRenderer, TableSummary};
use harden_runner::{CommandEngine, RunCoordinator, RunError, rebuild_report};

/// Harden - run a hardening playbook and report on every task and host
#[derive(Parser)]
#[command(name = "harden")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Do not print the console summary table
  #[arg(long, global = true)]
  quiet: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Collect facts, run the playbook and write a report
  Run {
    /// Playbook to execute
    #[arg(long)]
    playbook: PathBuf,

    /// Inventory to run against
    #[arg(long)]
    inventory: PathBuf,

    /// Directory under which run directories are created (default: ~/.harden/reports)
    #[arg(long)]
    report_root: Option<PathBuf>,
  },

  /// Build a report from a saved outcome document without running anything
  Report {
    /// Saved playbook outcome document
    #[arg(long)]
    outcome: PathBuf,

    /// Directory of per-host fact documents
    #[arg(long)]
    facts: Option<PathBuf>,

    /// Directory to write the report into
    #[arg(long)]
    out: PathBuf,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      match e.downcast_ref::<RunError>() {
        Some(run_error) => eprintln!("error: {run_error}"),
        None => eprintln!("error: {e:#}"),
      }
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let config_file = match &cli.config {
    Some(path) => load_config(path)?,
    None => ConfigFile::default(),
  };

  let summary: Box<dyn SummaryRenderer> = if cli.quiet {
    Box::new(NoopSummary)
  } else {
    Box::new(TableSummary::stdout())
  };

  match cli.command {
    Some(Commands::Run {
      playbook,
      inventory,
      report_root,
    }) => {
      let report_root = match report_root.or_else(|| config_file.report_root.clone()) {
        Some(root) => root,
        None => default_report_root()?,
      };
      run_playbook(config_file, report_root, summary, playbook, inventory)
    }
    Some(Commands::Report {
      outcome,
      facts,
      out,
    }) => build_report(config_file, summary, outcome, facts, out),
    None => {
      println!("harden - use --help to see available commands");
      Ok(())
    }
  }
}

fn load_config(path: &Path) -> Result<ConfigFile> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read config file: {}", path.display()))?;
  ConfigFile::from_json(&content)
    .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn default_report_root() -> Result<PathBuf> {
  let home = dirs::home_dir().context("could not determine home directory")?;
  Ok(home.join(".harden").join("reports"))
}

fn run_playbook(
  config_file: ConfigFile,
  report_root: PathBuf,
  summary: Box<dyn SummaryRenderer>,
  playbook: PathBuf,
  inventory: PathBuf,
) -> Result<()> {
  let config = config_file.into_config(report_root);
  let engine = Arc::new(CommandEngine::new(config.engine.clone()));
  let renderer = Arc::new(HtmlRenderer::new().context("failed to load report template")?);
  let coordinator = RunCoordinator::new(config, engine, renderer, summary);

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { coordinator.execute(&playbook, &inventory).await })?;
  Ok(())
}

fn build_report(
  config_file: ConfigFile,
  summary: Box<dyn SummaryRenderer>,
  outcome: PathBuf,
  facts: Option<PathBuf>,
  out: PathBuf,
) -> Result<()> {
  let renderer = Arc::new(HtmlRenderer::new().context("failed to load report template")?);
  let emitter = ReportEmitter::new(&config_file.artifacts, renderer);

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    rebuild_report(&outcome, facts.as_deref(), &out, &emitter, summary.as_ref()).await
  })?;
  Ok(())
}
