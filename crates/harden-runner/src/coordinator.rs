//! Run coordinator implementation.

use std::path::Path;
use std::sync::Arc;

use harden_config::RunnerConfig;
use harden_facts::{FactSet, FsFactReader};
use harden_outcome::parse;
use harden_report::{
  DocumentRenderer, Report, ReportEmitter, ReportError, RunInfo, RunOutcome, RunWarning,
  SummaryRenderer, aggregate,
};
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::engine::{Engine, PlaybookOutput};
use crate::error::{EngineError, RunError};
use crate::result::RunResult;
use crate::workdir::{WorkingDir, create_run_dir};

/// Drives one run end to end.
///
/// Phases run strictly in order: working directory, fact collection, playbook
/// execution, parsing, aggregation, emission. Only setup, parsing and
/// emission failures abort a run; everything else is recorded as a warning on
/// the run and reported.
pub struct RunCoordinator {
  config: RunnerConfig,
  engine: Arc<dyn Engine>,
  emitter: ReportEmitter,
  summary: Box<dyn SummaryRenderer>,
}

impl RunCoordinator {
  pub fn new(
    config: RunnerConfig,
    engine: Arc<dyn Engine>,
    renderer: Arc<dyn DocumentRenderer>,
    summary: Box<dyn SummaryRenderer>,
  ) -> Self {
    let emitter = ReportEmitter::new(&config.artifacts, renderer);
    Self {
      config,
      engine,
      emitter,
      summary,
    }
  }

  /// Execute a playbook against an inventory and report on it.
  #[instrument(
    name = "run_execute",
    skip(self, playbook, inventory),
    fields(
      playbook = %playbook.display(),
      inventory = %inventory.display(),
    )
  )]
  pub async fn execute(&self, playbook: &Path, inventory: &Path) -> Result<RunResult, RunError> {
    let workdir = create_run_dir(&self.config.report_root).await?;
    let mut run = RunInfo::start(&workdir.run_id, &workdir.path);
    run.playbook = Some(playbook.to_path_buf());
    run.inventory = Some(inventory.to_path_buf());

    info!(
      run_id = %run.run_id,
      working_dir = %workdir.path.display(),
      "run_started"
    );

    let facts = self.collect_facts(&mut run, &workdir, inventory).await;
    let output = self.execute_playbook(&mut run, playbook, inventory).await;
    self.save_raw_output(&workdir, &output).await?;

    let records = if output.has_output() {
      parse(&output.stdout).map_err(|source| {
        error!(run_id = %run.run_id, error = %source, "outcome parsing failed");
        RunError::MalformedOutcome {
          working_dir: workdir.path.clone(),
          source,
        }
      })?
    } else {
      Vec::new()
    };

    let report = aggregate(records, &facts);
    run.finish();

    let artifacts = self
      .emitter
      .emit(&run, &report, &workdir.path)
      .await
      .map_err(|source| {
        error!(run_id = %run.run_id, error = %source, "report generation failed");
        RunError::ReportGeneration {
          working_dir: workdir.path.clone(),
          source,
        }
      })?;

    info!(
      run_id = %run.run_id,
      outcome = %run.outcome,
      tasks = report.tasks.len(),
      warnings = run.warnings.len(),
      "run_completed"
    );

    println!("Working directory: {}", workdir.path.display());
    println!("Outcome: {}", run.outcome);
    show_summary(self.summary.as_ref(), &report);

    Ok(RunResult {
      run,
      report,
      artifacts,
    })
  }

  /// Phase 1. Never fails the run.
  ///
  /// A collection command that ran but exited non-zero (one unreachable host
  /// is enough) has still written documents for the other hosts, so they are
  /// read anyway.
  async fn collect_facts(
    &self,
    run: &mut RunInfo,
    workdir: &WorkingDir,
    inventory: &Path,
  ) -> FactSet {
    let dest = workdir.path.join(&self.config.artifacts.facts_dir);

    match self.engine.collect_facts(inventory, &dest).await {
      Ok(()) => {}
      Err(e @ EngineError::Failed { .. }) => {
        warn!(
          run_id = %run.run_id,
          error = %e,
          "fact collection reported failures, reading partial results"
        );
        run.warn(RunWarning::FactCollection {
          message: e.to_string(),
        });
      }
      Err(e) => {
        warn!(
          run_id = %run.run_id,
          error = %e,
          "fact collection failed, continuing without facts"
        );
        run.warn(RunWarning::FactCollection {
          message: e.to_string(),
        });
        return FactSet::new();
      }
    }

    match FsFactReader::new(dest).read().await {
      Ok(facts) => {
        info!(run_id = %run.run_id, hosts = facts.len(), "facts loaded");
        facts
      }
      Err(e) => {
        warn!(
          run_id = %run.run_id,
          error = %e,
          "fact documents unreadable, continuing without facts"
        );
        run.warn(RunWarning::FactCollection {
          message: e.to_string(),
        });
        FactSet::new()
      }
    }
  }

  /// Phase 2. Records abnormal termination on the run and sets its outcome.
  async fn execute_playbook(
    &self,
    run: &mut RunInfo,
    playbook: &Path,
    inventory: &Path,
  ) -> PlaybookOutput {
    let output = match self.engine.run_playbook(playbook, inventory).await {
      Ok(output) => output,
      Err(e) => {
        warn!(run_id = %run.run_id, error = %e, "playbook could not be started");
        run.warn(RunWarning::ExecutionPhase {
          message: e.to_string(),
          exit_code: None,
        });
        run.outcome = RunOutcome::Failure;
        return PlaybookOutput::default();
      }
    };

    if !output.success {
      warn!(
        run_id = %run.run_id,
        exit_code = ?output.exit_code,
        "playbook terminated abnormally"
      );
      run.warn(RunWarning::ExecutionPhase {
        message: "playbook terminated abnormally".to_string(),
        exit_code: output.exit_code,
      });
    }

    run.outcome = match (output.has_output(), output.success) {
      (false, _) => RunOutcome::Failure,
      (true, false) => RunOutcome::Partial,
      (true, true) => RunOutcome::Success,
    };

    if !output.has_output() {
      warn!(run_id = %run.run_id, "playbook produced no output, reporting an empty run");
    }

    output
  }

  /// Keep what the engine produced before anything interprets it.
  async fn save_raw_output(
    &self,
    workdir: &WorkingDir,
    output: &PlaybookOutput,
  ) -> Result<(), RunError> {
    let names = &self.config.artifacts;

    write_raw(&workdir.path, &workdir.path.join(&names.raw_output), &output.stdout).await?;
    if !output.stderr.is_empty() {
      write_raw(&workdir.path, &workdir.path.join(&names.raw_stderr), &output.stderr).await?;
    }
    Ok(())
  }
}

async fn write_raw(working_dir: &Path, path: &Path, contents: &[u8]) -> Result<(), RunError> {
  fs::write(path, contents)
    .await
    .map_err(|source| RunError::ReportGeneration {
      working_dir: working_dir.to_path_buf(),
      source: ReportError::Io {
        path: path.to_path_buf(),
        source,
      },
    })
}

/// Best effort; a broken console never affects the artifacts.
pub(crate) fn show_summary(summary: &dyn SummaryRenderer, report: &Report) {
  if let Err(e) = summary.render(report) {
    warn!(error = %e, "console summary failed");
  }
}
