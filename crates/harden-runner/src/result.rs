//! Run results.

use harden_report::{EmittedArtifacts, Report, RunInfo};

/// Result of a run whose structured report was produced.
///
/// Failed or unreachable tasks are data inside `report`, not errors.
#[derive(Debug, Clone)]
pub struct RunResult {
  pub run: RunInfo,
  pub report: Report,
  pub artifacts: EmittedArtifacts,
}
