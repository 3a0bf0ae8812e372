//! Error types for run coordination.

use std::path::{Path, PathBuf};

use harden_outcome::OutcomeError;
use harden_report::ReportError;
use thiserror::Error;

/// Errors raised by an [`Engine`](crate::Engine) implementation.
#[derive(Debug, Error)]
pub enum EngineError {
  /// The engine command could not be started.
  #[error("failed to start '{command}': {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The engine command ran but reported failure.
  #[error("'{command}' exited with {}: {stderr}", exit_code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
  Failed {
    command: String,
    exit_code: Option<i32>,
    stderr: String,
  },
}

/// Fatal run errors. Each one names the phase that failed and the directory
/// holding whatever was produced before the failure.
#[derive(Debug, Error)]
pub enum RunError {
  /// The run's working directory could not be created.
  #[error("run setup failed (working directory: {}): {source}", path.display())]
  Setup {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// An input artifact could not be read.
  #[error("reading input failed ({}): {source}", path.display())]
  Input {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The captured outcome document could not be parsed.
  #[error("outcome parsing failed (working directory: {}): {source}", working_dir.display())]
  MalformedOutcome {
    working_dir: PathBuf,
    #[source]
    source: OutcomeError,
  },

  /// The structured report could not be written.
  #[error("report generation failed (working directory: {}): {source}", working_dir.display())]
  ReportGeneration {
    working_dir: PathBuf,
    #[source]
    source: ReportError,
  },
}

impl RunError {
  /// Directory holding the partial artifacts of the failed run.
  pub fn working_dir(&self) -> &Path {
    match self {
      RunError::Setup { path, .. } | RunError::Input { path, .. } => path,
      RunError::MalformedOutcome { working_dir, .. }
      | RunError::ReportGeneration { working_dir, .. } => working_dir,
    }
  }
}
