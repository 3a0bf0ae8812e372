use serde::{Deserialize, Serialize};

/// File names used inside a run's working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
  /// Unified structured report.
  pub report_json: String,
  /// Rendered presentation document.
  pub report_document: String,
  /// Raw stdout of the playbook run, kept for forensic recovery.
  pub raw_output: String,
  /// Raw stderr of the playbook run (only written when non-empty).
  pub raw_stderr: String,
  /// Directory the fact collection phase writes per-host documents into.
  pub facts_dir: String,
}

impl Default for ArtifactNames {
  fn default() -> Self {
    Self {
      report_json: "final_report.json".to_string(),
      report_document: "report.html".to_string(),
      raw_output: "playbook_output.json".to_string(),
      raw_stderr: "playbook_stderr.log".to_string(),
      facts_dir: "facts".to_string(),
    }
  }
}
