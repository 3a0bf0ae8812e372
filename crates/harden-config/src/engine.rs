use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the external automation engine is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// Ad-hoc command used for fact collection, e.g. "ansible".
  pub ansible: String,

  /// Playbook command used for task execution, e.g. "ansible-playbook".
  pub ansible_playbook: String,

  /// Extra arguments appended to the playbook command line.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub playbook_args: Vec<String>,

  /// Extra environment variables for both phases.
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub env: BTreeMap<String, String>,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      ansible: "ansible".to_string(),
      ansible_playbook: "ansible-playbook".to_string(),
      playbook_args: Vec::new(),
      env: BTreeMap::new(),
    }
  }
}
