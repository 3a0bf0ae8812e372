//! Rebuilding a report from the artifacts of an earlier run.

use std::path::Path;

use harden_facts::{FactSet, FsFactReader};
use harden_outcome::parse;
use harden_report::{ReportEmitter, RunInfo, RunOutcome, RunWarning, SummaryRenderer, aggregate};
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::coordinator::show_summary;
use crate::error::RunError;
use crate::result::RunResult;

/// Aggregate a saved outcome document and fact directory and write a fresh
/// report into `dest`.
///
/// Nothing is executed. A missing fact directory simply yields a report
/// without facts; an empty outcome document yields an empty report with a
/// `failure` outcome, just as a run without output would.
#[instrument(
  name = "report_rebuild",
  skip(outcome, facts_dir, dest, emitter, summary),
  fields(outcome = %outcome.display(), dest = %dest.display())
)]
pub async fn rebuild_report(
  outcome: &Path,
  facts_dir: Option<&Path>,
  dest: &Path,
  emitter: &ReportEmitter,
  summary: &dyn SummaryRenderer,
) -> Result<RunResult, RunError> {
  let run_id = dest
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| "report".to_string());
  let mut run = RunInfo::start(run_id, dest);

  let raw = fs::read(outcome).await.map_err(|source| RunError::Input {
    path: outcome.to_path_buf(),
    source,
  })?;

  let facts = match facts_dir {
    Some(dir) => match FsFactReader::new(dir).read().await {
      Ok(facts) => facts,
      Err(e) => {
        warn!(error = %e, "fact documents unreadable, continuing without facts");
        run.warn(RunWarning::FactCollection {
          message: e.to_string(),
        });
        FactSet::new()
      }
    },
    None => FactSet::new(),
  };

  let records = parse(&raw).map_err(|source| RunError::MalformedOutcome {
    working_dir: dest.to_path_buf(),
    source,
  })?;

  if raw.trim_ascii().is_empty() {
    run.outcome = RunOutcome::Failure;
  }

  let report = aggregate(records, &facts);
  run.finish();

  let artifacts = emitter
    .emit(&run, &report, dest)
    .await
    .map_err(|source| RunError::ReportGeneration {
      working_dir: dest.to_path_buf(),
      source,
    })?;

  info!(
    tasks = report.tasks.len(),
    hosts = report.hosts.len(),
    "report rebuilt"
  );

  println!("Report written: {}", artifacts.json_path.display());
  show_summary(summary, &report);

  Ok(RunResult {
    run,
    report,
    artifacts,
  })
}
