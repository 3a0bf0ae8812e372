//! Run metadata carried in the report header.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
  /// The execution phase terminated normally.
  Success,
  /// The execution phase terminated abnormally, but its output was reported.
  Partial,
  /// The execution phase produced no output at all.
  Failure,
}

impl fmt::Display for RunOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      RunOutcome::Success => "success",
      RunOutcome::Partial => "partial",
      RunOutcome::Failure => "failure",
    })
  }
}

/// Non-fatal conditions recorded during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
  /// Fact collection failed; the run continued without facts.
  FactCollection { message: String },

  /// The execution phase terminated abnormally.
  ExecutionPhase {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
  },
}

impl fmt::Display for RunWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunWarning::FactCollection { message } => write!(f, "fact collection: {message}"),
      RunWarning::ExecutionPhase {
        message,
        exit_code: Some(code),
      } => write!(f, "execution phase (exit code {code}): {message}"),
      RunWarning::ExecutionPhase { message, .. } => write!(f, "execution phase: {message}"),
    }
  }
}

/// One execution attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
  pub run_id: String,
  pub working_dir: PathBuf,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub playbook: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub inventory: Option<PathBuf>,
  pub started_at: DateTime<Utc>,
  pub finished_at: Option<DateTime<Utc>>,
  pub outcome: RunOutcome,
  pub warnings: Vec<RunWarning>,
}

impl RunInfo {
  /// Start a run record. The outcome stays `Success` until a phase says otherwise.
  pub fn start(run_id: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
    Self {
      run_id: run_id.into(),
      working_dir: working_dir.into(),
      playbook: None,
      inventory: None,
      started_at: Utc::now(),
      finished_at: None,
      outcome: RunOutcome::Success,
      warnings: Vec::new(),
    }
  }

  pub fn warn(&mut self, warning: RunWarning) {
    self.warnings.push(warning);
  }

  /// Stamp the end time.
  pub fn finish(&mut self) {
    self.finished_at = Some(Utc::now());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_warning_serialization() {
    let warning = RunWarning::ExecutionPhase {
      message: "exited abnormally".to_string(),
      exit_code: Some(2),
    };
    assert_eq!(
      serde_json::to_value(&warning).unwrap(),
      json!({ "kind": "execution_phase", "message": "exited abnormally", "exit_code": 2 })
    );
    assert_eq!(
      warning.to_string(),
      "execution phase (exit code 2): exited abnormally"
    );
  }

  #[test]
  fn test_outcome_serialization() {
    assert_eq!(
      serde_json::to_value(RunOutcome::Partial).unwrap(),
      json!("partial")
    );
  }
}
